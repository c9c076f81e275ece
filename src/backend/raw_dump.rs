// 该文件是 Qiushi （秋实） 项目的一部分。
// src/backend/raw_dump.rs - 原始输出转储后端
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

use std::convert::Infallible;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::backend::InferenceBackend;
use crate::tensor::{InputTensor, RawOutput};

#[derive(Error, Debug)]
pub enum RawDumpError {
  #[error("转储读取错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("转储字节数 {0} 不是 4 的整数倍")]
  TruncatedFloat(usize),
  #[error("转储元素数 {len} 不能整除通道数 {channels}")]
  ChannelMismatch { len: usize, channels: usize },
}

/// 回放录制输出的后端
///
/// 从小端 f32 转储中重放一次真实推理的检测头输出，用于流水线诊断
/// 与确定性测试。转储布局与检测头一致：通道主序 `[1, channels, N]`。
pub struct RawDumpBackend {
  data: Vec<f32>,
  channels: usize,
  anchors: usize,
}

impl RawDumpBackend {
  /// 从转储文件加载
  pub fn from_file<P: AsRef<Path>>(path: P, channels: usize) -> Result<Self, RawDumpError> {
    info!("加载原始输出转储: {}", path.as_ref().display());
    let bytes = std::fs::read(path)?;
    debug!("转储文件大小: {:.2} KB", bytes.len() as f64 / 1024.0);

    if bytes.len() % 4 != 0 {
      return Err(RawDumpError::TruncatedFloat(bytes.len()));
    }

    let floats = bytes
      .chunks_exact(4)
      .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
      .collect();

    Self::from_vec(floats, channels)
  }

  /// 从内存数据构造
  pub fn from_vec(data: Vec<f32>, channels: usize) -> Result<Self, RawDumpError> {
    if channels == 0 || data.len() % channels != 0 {
      return Err(RawDumpError::ChannelMismatch {
        len: data.len(),
        channels,
      });
    }

    let anchors = data.len() / channels;
    debug!("转储形状: [1, {}, {}]", channels, anchors);

    Ok(Self {
      data,
      channels,
      anchors,
    })
  }

  pub fn anchors(&self) -> usize {
    self.anchors
  }
}

impl InferenceBackend for RawDumpBackend {
  type Error = Infallible;

  fn infer(&self, _input: &InputTensor) -> Result<RawOutput, Self::Error> {
    Ok(RawOutput::new(
      self.data.clone(),
      self.channels,
      self.anchors,
    ))
  }
}
