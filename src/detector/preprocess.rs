// 该文件是 Qiushi （秋实） 项目的一部分。
// src/detector/preprocess.rs - 图像预处理
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

use crate::tensor::InputTensor;

/// 把任意尺寸的 RGB 图像整理成模型输入张量
///
/// 非等比拉伸到 `target_size × target_size`（与训练时一致），逐通道
/// 归一化到 [0, 1]，输出 NCHW 布局、batch 为 1。
pub fn prepare(image: &RgbImage, target_size: u32) -> InputTensor {
  debug!(
    "预处理: {}x{} -> {}x{}",
    image.width(),
    image.height(),
    target_size,
    target_size
  );

  let resized = image::imageops::resize(
    image,
    target_size,
    target_size,
    image::imageops::FilterType::Triangle,
  );

  let side = target_size as usize;
  let plane = side * side;
  let mut data = vec![0.0f32; 3 * plane];

  for (x, y, pixel) in resized.enumerate_pixels() {
    let idx = (y as usize) * side + (x as usize);
    data[idx] = pixel[0] as f32 / 255.0;
    data[plane + idx] = pixel[1] as f32 / 255.0;
    data[2 * plane + idx] = pixel[2] as f32 / 255.0;
  }

  InputTensor::new(data, target_size, target_size)
}
