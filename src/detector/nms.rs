// 该文件是 Qiushi （秋实） 项目的一部分。
// src/detector/nms.rs - 非极大值抑制
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

use tracing::debug;

use crate::detector::core::{Candidate, CornerBox};

/// 中心形式转角点形式，整数向零截断
///
/// 截断而非四舍五入：.5 边界值向零取整，与参考实现保持一致。
pub fn to_corner(candidate: &Candidate) -> CornerBox {
  let [cx, cy, w, h] = candidate.bbox;
  CornerBox {
    x: (cx - w / 2.0) as i32,
    y: (cy - h / 2.0) as i32,
    w: w as i32,
    h: h as i32,
  }
}

/// 计算两个角点形式边框的 IoU
pub fn iou(a: &CornerBox, b: &CornerBox) -> f32 {
  let x1 = a.x.max(b.x);
  let y1 = a.y.max(b.y);
  let x2 = (a.x + a.w).min(b.x + b.w);
  let y2 = (a.y + a.h).min(b.y + b.h);

  let intersection = ((x2 - x1).max(0) as f32) * ((y2 - y1).max(0) as f32);
  let area_a = (a.w as f32) * (a.h as f32);
  let area_b = (b.w as f32) * (b.h as f32);
  let union = area_a + area_b - intersection;

  if union > 0.0 { intersection / union } else { 0.0 }
}

/// 贪心非极大值抑制，返回幸存候选的下标
///
/// 按置信度降序，每轮选出最高者并淘汰与其 IoU 严格大于
/// `iou_threshold` 的其余边框。`confidence_threshold` 与上游过滤
/// 取同一值，低于或等于阈值的候选在这里再次被排除。
///
/// 抑制不区分类别：不同类别的边框会相互抑制。该行为沿袭参考实现，
/// 按类别分组抑制属于另一个需要单独评估的变更。
pub fn suppress(
  candidates: &[Candidate],
  confidence_threshold: f32,
  iou_threshold: f32,
) -> Vec<usize> {
  if candidates.is_empty() {
    return Vec::new();
  }

  let boxes: Vec<CornerBox> = candidates.iter().map(to_corner).collect();

  let mut order: Vec<usize> = (0..candidates.len())
    .filter(|&i| candidates[i].confidence > confidence_threshold)
    .collect();
  order.sort_by(|&a, &b| {
    candidates[b]
      .confidence
      .total_cmp(&candidates[a].confidence)
  });

  let mut survivors = Vec::new();
  while !order.is_empty() {
    let best = order.remove(0);
    survivors.push(best);
    order.retain(|&i| iou(&boxes[best], &boxes[i]) <= iou_threshold);
  }

  debug!(
    "NMS: {} 个候选 -> {} 个幸存",
    candidates.len(),
    survivors.len()
  );
  survivors
}
