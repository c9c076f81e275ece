// 该文件是 Qiushi （秋实） 项目的一部分。
// src/main.rs - 项目主程序
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

mod args;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::info;

use qiushi::backend::RawDumpBackend;
use qiushi::config::DetectorConfig;
use qiushi::detector::Detector;

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("输入图像: {}", args.image.display());
  info!("原始输出转储: {}", args.raw_output.display());
  info!("置信度阈值: {}", args.confidence);
  info!("NMS 阈值: {}", args.nms_threshold);

  let config = DetectorConfig::default()
    .with_confidence_threshold(args.confidence)
    .with_iou_threshold(args.nms_threshold)
    .with_input_size(args.input_size)
    .with_color_reclassify(args.color_reclassify);

  let backend = RawDumpBackend::from_file(&args.raw_output, 4 + config.num_classes)?;
  let detector = Detector::new(backend, config)?;

  let image_bytes = std::fs::read(&args.image)?;

  info!("开始检测...");
  let now = std::time::Instant::now();
  let (summary, detections) = detector.detect(&image_bytes, args.confidence)?;
  let elapsed = now.elapsed();
  info!("检测完成，耗时: {:.2?}", elapsed);

  if args.json {
    let value = json!({
      "summary": summary.to_json(),
      "detections": detections.iter().map(|d| d.to_json()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
  } else {
    println!("检测到 {} 个苹果", summary.total);
    for detection in &detections {
      println!(
        "  - {}: {:.2}% at ({}, {}, {}x{})",
        detection.class.label(),
        detection.confidence * 100.0,
        detection.x,
        detection.y,
        detection.width,
        detection.height
      );
    }
    println!();
    println!("健康: {}", summary.healthy);
    println!("受损: {}", summary.damaged);
    println!("总计: {}", summary.total);
    println!("健康指数: {:.2}", summary.health_index);
  }

  Ok(())
}
