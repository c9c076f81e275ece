// 该文件是 Qiushi （秋实） 项目的一部分。
// src/args.rs - 项目参数配置
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

use std::path::PathBuf;

use clap::Parser;

/// Qiushi 产量估计流水线诊断工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 输入图像路径（JPEG/PNG）
  #[arg(long, value_name = "IMAGE")]
  pub image: PathBuf,

  /// 录制的检测头原始输出转储（小端 f32，通道主序）
  #[arg(long, value_name = "DUMP")]
  pub raw_output: PathBuf,

  /// 置信度阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.35", value_name = "THRESHOLD")]
  pub confidence: f32,

  /// NMS IOU 阈值 (0.0 - 1.0)
  #[arg(long, default_value = "0.45", value_name = "THRESHOLD")]
  pub nms_threshold: f32,

  /// 模型输入边长
  #[arg(long, default_value = "640", value_name = "SIZE")]
  pub input_size: u32,

  /// 启用红绿颜色重分类
  #[arg(long)]
  pub color_reclassify: bool,

  /// 以 JSON 格式输出结果
  #[arg(long)]
  pub json: bool,
}
