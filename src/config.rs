// 该文件是 Qiushi （秋实） 项目的一部分。
// src/config.rs - 检测流水线配置
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

use thiserror::Error;

/// 默认置信度阈值
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.35;
/// 默认 NMS IOU 阈值
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.45;
/// 默认模型输入边长（正方形输入）
pub const DEFAULT_INPUT_SIZE: u32 = 640;
/// 模型类别数量（apple / damaged_apple）
pub const MODEL_CLASS_NUM: usize = 2;

/// 灵敏度到置信度阈值的固定换算系数
///
/// 上层界面暴露的是“灵敏度”，流水线消费的是置信度阈值；两者之间
/// 始终按该系数换算。调用方必须把同一个换算结果同时交给置信度
/// 过滤与 NMS，两处不一致会导致计数漂移。
pub const SENSITIVITY_SCALE: f32 = 0.8;

/// 由界面灵敏度换算出置信度阈值
pub fn confidence_from_sensitivity(sensitivity: f32) -> f32 {
  sensitivity * SENSITIVITY_SCALE
}

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("置信度阈值必须位于 (0, 1) 区间: {0}")]
  InvalidConfidenceThreshold(f32),
  #[error("NMS IOU 阈值必须位于 (0, 1) 区间: {0}")]
  InvalidIouThreshold(f32),
  #[error("模型输入尺寸必须大于 0")]
  InvalidInputSize,
  #[error("类别数量必须大于 0")]
  InvalidClassNum,
}

/// 检测流水线配置
///
/// 一条流水线只存在一套配置开关，不再维护平行的流水线变体。
#[derive(Debug, Clone)]
pub struct DetectorConfig {
  /// 置信度阈值（严格大于才保留）
  pub confidence_threshold: f32,
  /// NMS IOU 阈值（严格大于才抑制）
  pub iou_threshold: f32,
  /// 模型输入边长
  pub input_size: u32,
  /// 模型输出类别数量
  pub num_classes: usize,
  /// 是否启用红绿颜色重分类
  pub color_reclassify: bool,
}

impl Default for DetectorConfig {
  fn default() -> Self {
    Self {
      confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
      iou_threshold: DEFAULT_IOU_THRESHOLD,
      input_size: DEFAULT_INPUT_SIZE,
      num_classes: MODEL_CLASS_NUM,
      color_reclassify: false,
    }
  }
}

impl DetectorConfig {
  pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
    self.confidence_threshold = threshold;
    self
  }

  pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
    self.iou_threshold = threshold;
    self
  }

  pub fn with_input_size(mut self, input_size: u32) -> Self {
    self.input_size = input_size;
    self
  }

  pub fn with_color_reclassify(mut self, enabled: bool) -> Self {
    self.color_reclassify = enabled;
    self
  }

  /// 校验配置
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(self.confidence_threshold > 0.0 && self.confidence_threshold < 1.0) {
      return Err(ConfigError::InvalidConfidenceThreshold(
        self.confidence_threshold,
      ));
    }
    if !(self.iou_threshold > 0.0 && self.iou_threshold < 1.0) {
      return Err(ConfigError::InvalidIouThreshold(self.iou_threshold));
    }
    if self.input_size == 0 {
      return Err(ConfigError::InvalidInputSize);
    }
    if self.num_classes == 0 {
      return Err(ConfigError::InvalidClassNum);
    }
    Ok(())
  }
}
