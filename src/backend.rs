// 该文件是 Qiushi （秋实） 项目的一部分。
// src/backend.rs - 推理后端
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use crate::tensor::{InputTensor, RawOutput};

mod raw_dump;

pub use raw_dump::{RawDumpBackend, RawDumpError};

/// 推理后端
///
/// 任何能执行导出网络的运行时都满足该契约。后端由调用方显式构造并
/// 注入检测器，流水线自身不持有任何进程级全局状态。
pub trait InferenceBackend {
  type Error: std::error::Error + Send + Sync + 'static;

  /// 执行一次推理，返回检测头原始输出
  fn infer(&self, input: &InputTensor) -> Result<RawOutput, Self::Error>;
}
