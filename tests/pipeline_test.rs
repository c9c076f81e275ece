// 该文件是 Qiushi （秋实） 项目的一部分。
// tests/pipeline_test.rs - 流水线集成测试
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

use std::io::Cursor;

use image::RgbImage;

use qiushi::backend::RawDumpBackend;
use qiushi::config::DetectorConfig;
use qiushi::detector::{DetectError, Detector};

const CHANNELS: usize = 6; // 4 + 2 类

/// 按通道主序拼一份检测头输出转储
///
/// 每个条目为（中心形式边框, [apple 分数, damaged_apple 分数]）。
fn raw_dump(entries: &[([f32; 4], [f32; 2])]) -> Vec<f32> {
  let anchors = entries.len();
  let mut data = vec![0.0f32; CHANNELS * anchors];
  for (i, (bbox, scores)) in entries.iter().enumerate() {
    for c in 0..4 {
      data[c * anchors + i] = bbox[c];
    }
    data[4 * anchors + i] = scores[0];
    data[5 * anchors + i] = scores[1];
  }
  data
}

fn detector_for(entries: &[([f32; 4], [f32; 2])]) -> Detector<RawDumpBackend> {
  let backend = RawDumpBackend::from_vec(raw_dump(entries), CHANNELS).unwrap();
  Detector::new(backend, DetectorConfig::default()).unwrap()
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
  let image = RgbImage::from_pixel(width, height, image::Rgb([180, 50, 50]));
  let mut bytes = Vec::new();
  image::DynamicImage::ImageRgb8(image)
    .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
    .unwrap();
  bytes
}

#[test]
fn scenario_empty_image_yields_zero_summary() {
  // 所有候选都低于阈值：正常结果而非错误
  let detector = detector_for(&[
    ([100.0, 100.0, 40.0, 40.0], [0.1, 0.05]),
    ([300.0, 300.0, 40.0, 40.0], [0.2, 0.1]),
  ]);

  let (summary, detections) = detector.detect(&png_bytes(1280, 720), 0.35).unwrap();
  assert!(detections.is_empty());
  assert_eq!(summary.total, 0);
  assert_eq!(summary.healthy, 0);
  assert_eq!(summary.damaged, 0);
  assert_eq!(summary.health_index, 0.0);
}

#[test]
fn scenario_overlapping_cluster_keeps_best() {
  // 三个近乎重合的类别 0 边框，置信度 0.9 / 0.85 / 0.82
  let detector = detector_for(&[
    ([100.0, 100.0, 40.0, 40.0], [0.9, 0.0]),
    ([102.0, 102.0, 40.0, 40.0], [0.85, 0.0]),
    ([99.0, 101.0, 40.0, 40.0], [0.82, 0.0]),
  ]);

  let (summary, detections) = detector.detect(&png_bytes(1280, 720), 0.35).unwrap();
  assert_eq!(detections.len(), 1);
  assert_eq!(summary.total, 1);
  assert!((detections[0].confidence - 0.9).abs() < 1e-6);
}

#[test]
fn scenario_threshold_is_strict() {
  // 置信度恰好等于阈值的候选被丢弃
  let detector = detector_for(&[([100.0, 100.0, 40.0, 40.0], [0.5, 0.0])]);

  let (summary, detections) = detector.detect(&png_bytes(1280, 720), 0.5).unwrap();
  assert!(detections.is_empty());
  assert_eq!(summary.total, 0);
}

#[test]
fn scenario_rescale_to_full_hd() {
  // 模型空间中心 (125, 125, 50, 50) → 原图 (300, 168, 150x84)
  let detector = detector_for(&[([125.0, 125.0, 50.0, 50.0], [0.9, 0.0])]);

  let (_, detections) = detector.detect(&png_bytes(1920, 1080), 0.35).unwrap();
  assert_eq!(detections.len(), 1);
  let d = &detections[0];
  assert_eq!((d.x, d.y, d.width, d.height), (300, 168, 150, 84));
}

#[test]
fn scenario_health_index_four_of_five() {
  let detector = detector_for(&[
    ([50.0, 50.0, 30.0, 30.0], [0.9, 0.0]),
    ([150.0, 50.0, 30.0, 30.0], [0.85, 0.0]),
    ([250.0, 50.0, 30.0, 30.0], [0.8, 0.0]),
    ([350.0, 50.0, 30.0, 30.0], [0.75, 0.0]),
    ([450.0, 50.0, 30.0, 30.0], [0.0, 0.9]),
  ]);

  let (summary, _) = detector.detect(&png_bytes(1280, 720), 0.35).unwrap();
  assert_eq!(summary.healthy, 4);
  assert_eq!(summary.damaged, 1);
  assert_eq!(summary.total, 5);
  assert_eq!(summary.health_index, 80.0);
}

#[test]
fn detect_is_deterministic() {
  let detector = detector_for(&[
    ([100.0, 100.0, 40.0, 40.0], [0.9, 0.1]),
    ([300.0, 200.0, 60.0, 50.0], [0.2, 0.8]),
    ([500.0, 400.0, 30.0, 30.0], [0.6, 0.3]),
  ]);
  let bytes = png_bytes(1280, 720);

  let (summary_a, detections_a) = detector.detect(&bytes, 0.35).unwrap();
  let (summary_b, detections_b) = detector.detect(&bytes, 0.35).unwrap();
  assert_eq!(summary_a, summary_b);
  assert_eq!(detections_a, detections_b);
}

#[test]
fn count_invariant_and_containment() {
  let detector = detector_for(&[
    ([20.0, 20.0, 60.0, 60.0], [0.9, 0.0]), // 左上角，夹紧
    ([620.0, 620.0, 60.0, 60.0], [0.0, 0.8]), // 右下角，夹紧
    ([320.0, 320.0, 40.0, 40.0], [0.7, 0.2]),
  ]);

  let (summary, detections) = detector.detect(&png_bytes(1013, 771), 0.35).unwrap();
  assert_eq!(summary.total, summary.healthy + summary.damaged);
  assert_eq!(summary.total as usize, detections.len());
  assert!(summary.health_index >= 0.0 && summary.health_index <= 100.0);

  for d in &detections {
    assert!(d.x >= 0);
    assert!(d.y >= 0);
    assert!(d.width > 0);
    assert!(d.height > 0);
    assert!(d.x_max() <= 1013);
    assert!(d.y_max() <= 771);
  }
}

#[test]
fn raising_threshold_never_adds_detections() {
  let detector = detector_for(&[
    ([50.0, 50.0, 30.0, 30.0], [0.3, 0.0]),
    ([150.0, 150.0, 30.0, 30.0], [0.5, 0.0]),
    ([250.0, 250.0, 30.0, 30.0], [0.0, 0.7]),
    ([350.0, 350.0, 30.0, 30.0], [0.9, 0.0]),
  ]);
  let bytes = png_bytes(1280, 720);

  let mut last = usize::MAX;
  for threshold in [0.2, 0.4, 0.6, 0.8] {
    let (_, detections) = detector.detect(&bytes, threshold).unwrap();
    assert!(detections.len() <= last);
    last = detections.len();
  }
}

#[test]
fn undecodable_bytes_propagate_image_error() {
  let detector = detector_for(&[([100.0, 100.0, 40.0, 40.0], [0.9, 0.0])]);
  let result = detector.detect(b"definitely not an image", 0.35);
  assert!(matches!(result, Err(DetectError::Image(_))));
}

#[test]
fn green_reclassification_is_toggleable() {
  let entries = [([320.0, 320.0, 100.0, 100.0], [0.9f32, 0.0f32])];
  let green_image = {
    let image = RgbImage::from_pixel(800, 800, image::Rgb([60, 200, 60]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
      .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
      .unwrap();
    bytes
  };

  // 默认关闭：保持类别 0
  let (summary, detections) = detector_for(&entries)
    .detect(&green_image, 0.35)
    .unwrap();
  assert_eq!(detections[0].class, qiushi::AppleClass::Healthy);
  assert_eq!(summary.healthy, 1);

  // 启用后：改判为青苹果，仍计入健康
  let backend = RawDumpBackend::from_vec(raw_dump(&entries), CHANNELS).unwrap();
  let detector = Detector::new(
    backend,
    DetectorConfig::default().with_color_reclassify(true),
  )
  .unwrap();
  let (summary, detections) = detector.detect(&green_image, 0.35).unwrap();
  assert_eq!(detections[0].class, qiushi::AppleClass::Green);
  assert_eq!(summary.healthy, 1);
  assert_eq!(summary.damaged, 0);
}
