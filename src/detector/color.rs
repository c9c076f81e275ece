// 该文件是 Qiushi （秋实） 项目的一部分。
// src/detector/color.rs - 红绿颜色重分类
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

use crate::detector::core::AppleClass;

// 色相窗口（角度制，[0, 360)）
const RED_HUE_LOW: f32 = 20.0; // 小于该值计红
const RED_HUE_HIGH: f32 = 340.0; // 大于等于该值计红
const GREEN_HUE_MIN: f32 = 70.0;
const GREEN_HUE_MAX: f32 = 170.0;

/// 基于色相占比的红绿重分类器
///
/// 实验性策略，独立于主流水线开关：仅当启用时才对类别 0 的检测
/// 生效。在检测框覆盖的像素上分别统计红、绿色相窗口的占比，
/// 绿色占比严格大于阈值且严格大于红色占比时改判为青苹果。
#[derive(Debug, Clone)]
pub struct ColorReclassifier {
  /// 绿色像素占比阈值
  green_ratio_threshold: f32,
  /// 低于该饱和度的像素不计入任一窗口
  min_saturation: f32,
  /// 低于该明度的像素不计入任一窗口
  min_value: f32,
}

impl Default for ColorReclassifier {
  fn default() -> Self {
    Self {
      green_ratio_threshold: 0.30,
      min_saturation: 0.25,
      min_value: 0.20,
    }
  }
}

/// RGB 转 HSV，返回 (h, s, v)，h 取值 [0, 360)，s/v 取值 [0, 1]
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
  let r = r as f32 / 255.0;
  let g = g as f32 / 255.0;
  let b = b as f32 / 255.0;

  let max = r.max(g).max(b);
  let min = r.min(g).min(b);
  let delta = max - min;

  let h = if delta == 0.0 {
    0.0
  } else if max == r {
    60.0 * (((g - b) / delta).rem_euclid(6.0))
  } else if max == g {
    60.0 * ((b - r) / delta + 2.0)
  } else {
    60.0 * ((r - g) / delta + 4.0)
  };

  let s = if max == 0.0 { 0.0 } else { delta / max };

  (h, s, max)
}

impl ColorReclassifier {
  /// 对单个已裁剪到图像范围内的检测框做重分类
  ///
  /// 框必须满足 `x + w <= 图像宽`、`y + h <= 图像高` 且 `w, h > 0`，
  /// 由重缩放阶段保证。
  pub fn reclassify(&self, image: &RgbImage, x: u32, y: u32, w: u32, h: u32) -> AppleClass {
    let mut red_pixels = 0usize;
    let mut green_pixels = 0usize;
    let total = (w as usize) * (h as usize);

    for py in y..y + h {
      for px in x..x + w {
        let pixel = image.get_pixel(px, py);
        let (hue, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
        if s < self.min_saturation || v < self.min_value {
          continue;
        }
        if hue < RED_HUE_LOW || hue >= RED_HUE_HIGH {
          red_pixels += 1;
        } else if (GREEN_HUE_MIN..GREEN_HUE_MAX).contains(&hue) {
          green_pixels += 1;
        }
      }
    }

    let red_ratio = red_pixels as f32 / total as f32;
    let green_ratio = green_pixels as f32 / total as f32;

    if green_ratio > self.green_ratio_threshold && green_ratio > red_ratio {
      AppleClass::Green
    } else {
      AppleClass::Healthy
    }
  }
}
