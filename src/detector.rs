// 该文件是 Qiushi （秋实） 项目的一部分。
// src/detector.rs - 检测流水线
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
use thiserror::Error;
use tracing::debug;

mod color;
mod core;
mod decode;
mod filter;
mod finalize;
mod nms;
mod preprocess;

pub use color::ColorReclassifier;
pub use self::core::{AppleClass, Candidate, CornerBox, Detection, DetectionSummary, RawCandidate};
pub use decode::{ShapeMismatchError, decode};
pub use filter::filter;
pub use finalize::{finalize, rescale, summarize};
pub use nms::{iou, suppress, to_corner};
pub use preprocess::prepare;

use crate::backend::InferenceBackend;
use crate::config::{ConfigError, DetectorConfig};
use crate::input::{ImageDecodeError, decode_image_bytes};

#[derive(Error, Debug)]
pub enum DetectError<E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  #[error("图像解码错误: {0}")]
  Image(#[from] ImageDecodeError),
  #[error("输出形状不匹配: {0}")]
  Shape(#[from] ShapeMismatchError),
  #[error("推理后端错误: {0}")]
  Backend(#[source] E),
}

/// 检测流水线
///
/// 预处理 → 推理 → 解码 → 置信度过滤 → NMS → 重缩放与汇总，
/// 五个阶段严格线性。推理后端由调用方构造并注入；每次调用自持
/// 全部缓冲，调用之间没有共享可变状态，可在独立线程上并发使用。
pub struct Detector<B> {
  backend: B,
  config: DetectorConfig,
  reclassifier: Option<ColorReclassifier>,
}

impl<B: InferenceBackend> Detector<B> {
  /// 创建检测流水线，构造时校验配置
  pub fn new(backend: B, config: DetectorConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    let reclassifier = config.color_reclassify.then(ColorReclassifier::default);

    Ok(Self {
      backend,
      config,
      reclassifier,
    })
  }

  pub fn config(&self) -> &DetectorConfig {
    &self.config
  }

  /// 对一张图像的字节流执行完整检测
  ///
  /// `confidence_threshold` 由调用方给定（通常由界面灵敏度按
  /// [`crate::config::SENSITIVITY_SCALE`] 换算而来），同一个值同时
  /// 作用于置信度过滤与 NMS。后端错误原样向上传播，不在流水线
  /// 内部重试：相同输入重复同一确定性计算不会得到不同结果。
  pub fn detect(
    &self,
    image_bytes: &[u8],
    confidence_threshold: f32,
  ) -> Result<(DetectionSummary, Vec<Detection>), DetectError<B::Error>> {
    let image = decode_image_bytes(image_bytes)?;
    self.detect_image(&image, confidence_threshold)
  }

  /// 对已解码图像执行完整检测
  pub fn detect_image(
    &self,
    image: &RgbImage,
    confidence_threshold: f32,
  ) -> Result<(DetectionSummary, Vec<Detection>), DetectError<B::Error>> {
    let tensor = prepare(image, self.config.input_size);

    let output = self
      .backend
      .infer(&tensor)
      .map_err(DetectError::Backend)?;

    let raw_candidates = decode(&output, self.config.num_classes)?;
    let candidates = filter(&raw_candidates, confidence_threshold);
    debug!("过滤后剩余 {} 个候选", candidates.len());

    let survivors = suppress(&candidates, confidence_threshold, self.config.iou_threshold);

    let (summary, detections) = finalize(
      &candidates,
      &survivors,
      image,
      self.config.input_size,
      self.reclassifier.as_ref(),
    );

    Ok((summary, detections))
  }
}
