// 该文件是 Qiushi （秋实） 项目的一部分。
// src/detector/core.rs - 检测数据类型
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

use serde_json::json;

/// 输出类别
///
/// 模型本身只区分 0（健康）与 1（受损）；2（青苹果）由可选的颜色
/// 重分类从类别 0 中拆分出来，不是模型类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppleClass {
  /// 红苹果 / 健康
  Healthy,
  /// 受损苹果
  Damaged,
  /// 青苹果（同样计入健康）
  Green,
}

impl AppleClass {
  pub fn from_class_id(id: usize) -> Option<Self> {
    match id {
      0 => Some(AppleClass::Healthy),
      1 => Some(AppleClass::Damaged),
      2 => Some(AppleClass::Green),
      _ => None,
    }
  }

  pub fn class_id(&self) -> u32 {
    match self {
      AppleClass::Healthy => 0,
      AppleClass::Damaged => 1,
      AppleClass::Green => 2,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      AppleClass::Healthy => "apple",
      AppleClass::Damaged => "damaged_apple",
      AppleClass::Green => "green_apple",
    }
  }

  pub fn is_healthy(&self) -> bool {
    matches!(self, AppleClass::Healthy | AppleClass::Green)
  }
}

/// 解码后的未过滤候选
///
/// 边框为模型输入空间的中心形式 (cx, cy, w, h)，分数向量尚未归并。
#[derive(Debug, Clone)]
pub struct RawCandidate {
  pub bbox: [f32; 4],
  pub scores: Box<[f32]>,
}

/// 过滤后的候选
#[derive(Debug, Clone)]
pub struct Candidate {
  /// 模型输入空间的中心形式边框 (cx, cy, w, h)
  pub bbox: [f32; 4],
  pub class_id: usize,
  pub confidence: f32,
}

/// 角点形式整数边框 (x, y, w, h)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerBox {
  pub x: i32,
  pub y: i32,
  pub w: i32,
  pub h: i32,
}

/// 最终检测结果
///
/// 坐标位于原始图像像素空间，始终满足
/// `0 <= x`，`0 <= y`，`x + width <= 图像宽`，`y + height <= 图像高`，
/// 且 `width > 0`、`height > 0`。
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
  pub x: i32,
  pub y: i32,
  pub width: i32,
  pub height: i32,
  pub class: AppleClass,
  pub confidence: f32,
}

impl Detection {
  /// 右边界（持久化列 `x_max`）
  pub fn x_max(&self) -> i32 {
    self.x + self.width
  }

  /// 下边界（持久化列 `y_max`）
  pub fn y_max(&self) -> i32 {
    self.y + self.height
  }

  pub fn to_json(&self) -> serde_json::Value {
    json!({
      "class_label": self.class.label(),
      "confidence": self.confidence,
      "x_min": self.x,
      "y_min": self.y,
      "x_max": self.x_max(),
      "y_max": self.y_max(),
    })
  }
}

/// 计数汇总
///
/// 始终满足 `total == healthy + damaged`；`health_index` 为
/// `healthy / total * 100` 保留两位小数，`total == 0` 时定义为 0.0。
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSummary {
  pub healthy: u32,
  pub damaged: u32,
  pub total: u32,
  pub health_index: f64,
}

impl DetectionSummary {
  pub fn to_json(&self) -> serde_json::Value {
    json!({
      "healthy_count": self.healthy,
      "damaged_count": self.damaged,
      "total_count": self.total,
      "health_index": self.health_index,
    })
  }
}
