// 该文件是 Qiushi （秋实） 项目的一部分。
// src/detector/finalize.rs - 重缩放与计数汇总
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

use image::RgbImage;
use tracing::debug;

use crate::detector::color::ColorReclassifier;
use crate::detector::core::{AppleClass, Candidate, CornerBox, Detection, DetectionSummary};
use crate::detector::nms::to_corner;

/// 把模型输入空间的角点框映射回原始图像空间
///
/// 两轴缩放系数各自独立（预处理是非等比拉伸），乘积向零截断后
/// 夹到图像范围内；夹紧后宽或高不为正的框整体丢弃，不留退化框。
pub fn rescale(
  bbox: &CornerBox,
  x_scale: f32,
  y_scale: f32,
  original_width: i32,
  original_height: i32,
) -> Option<CornerBox> {
  let x = (bbox.x as f32 * x_scale) as i32;
  let y = (bbox.y as f32 * y_scale) as i32;
  let w = (bbox.w as f32 * x_scale) as i32;
  let h = (bbox.h as f32 * y_scale) as i32;

  let x = x.max(0);
  let y = y.max(0);
  let w = w.min(original_width - x);
  let h = h.min(original_height - y);

  if w <= 0 || h <= 0 {
    return None;
  }

  Some(CornerBox { x, y, w, h })
}

/// 由检测列表计算计数汇总
pub fn summarize(detections: &[Detection]) -> DetectionSummary {
  let mut healthy = 0u32;
  let mut damaged = 0u32;

  for detection in detections {
    if detection.class.is_healthy() {
      healthy += 1;
    } else {
      damaged += 1;
    }
  }

  let total = healthy + damaged;
  let health_index = if total > 0 {
    (healthy as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
  } else {
    0.0
  };

  DetectionSummary {
    healthy,
    damaged,
    total,
    health_index,
  }
}

/// 重缩放幸存候选并汇总计数
///
/// 对每个幸存候选：转角点形式、映射回原图、夹紧、丢弃退化框；
/// 类别 0 在启用重分类器时可能被改判为青苹果。给定相同输入，
/// 结果完全确定。
pub fn finalize(
  candidates: &[Candidate],
  survivors: &[usize],
  original: &RgbImage,
  input_size: u32,
  reclassifier: Option<&ColorReclassifier>,
) -> (DetectionSummary, Vec<Detection>) {
  let original_width = original.width() as i32;
  let original_height = original.height() as i32;
  let x_scale = original.width() as f32 / input_size as f32;
  let y_scale = original.height() as f32 / input_size as f32;

  let mut detections = Vec::with_capacity(survivors.len());

  for &i in survivors {
    let candidate = &candidates[i];

    let Some(class) = AppleClass::from_class_id(candidate.class_id) else {
      debug!("跳过未知类别 {}", candidate.class_id);
      continue;
    };

    let corner = to_corner(candidate);
    let Some(bbox) = rescale(&corner, x_scale, y_scale, original_width, original_height) else {
      debug!("丢弃退化框: 候选 {}", i);
      continue;
    };

    let class = match (class, reclassifier) {
      (AppleClass::Healthy, Some(rc)) => rc.reclassify(
        original,
        bbox.x as u32,
        bbox.y as u32,
        bbox.w as u32,
        bbox.h as u32,
      ),
      (class, _) => class,
    };

    detections.push(Detection {
      x: bbox.x,
      y: bbox.y,
      width: bbox.w,
      height: bbox.h,
      class,
      confidence: candidate.confidence,
    });
  }

  let summary = summarize(&detections);
  debug!(
    "汇总: 健康 {} / 受损 {} / 总计 {}，健康指数 {:.2}",
    summary.healthy, summary.damaged, summary.total, summary.health_index
  );

  (summary, detections)
}
