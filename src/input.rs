// 该文件是 Qiushi （秋实） 项目的一部分。
// src/input.rs - 图像输入
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

#[derive(Error, Debug)]
pub enum ImageDecodeError {
  #[error("无法解码图像: {0}")]
  DecodeFailed(#[from] image::ImageError),
  #[error("图像为空或尺寸为零: {width}x{height}")]
  EmptyImage { width: u32, height: u32 },
}

/// 从字节流解码 RGB 图像
///
/// 支持 JPEG/PNG 等标准格式；空字节流或解码后宽高为零均视为错误。
pub fn decode_image_bytes(bytes: &[u8]) -> Result<RgbImage, ImageDecodeError> {
  if bytes.is_empty() {
    return Err(ImageDecodeError::EmptyImage {
      width: 0,
      height: 0,
    });
  }

  let image = image::load_from_memory(bytes)?.to_rgb8();
  let (width, height) = image.dimensions();
  if width == 0 || height == 0 {
    return Err(ImageDecodeError::EmptyImage { width, height });
  }

  debug!("图像解码完成: {}x{}", width, height);
  Ok(image)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  #[test]
  fn decode_valid_png() {
    let image = RgbImage::from_pixel(8, 6, image::Rgb([120, 30, 30]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
      .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
      .unwrap();

    let decoded = decode_image_bytes(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (8, 6));
  }

  #[test]
  fn decode_garbage_bytes() {
    let result = decode_image_bytes(b"not an image at all");
    assert!(matches!(result, Err(ImageDecodeError::DecodeFailed(_))));
  }

  #[test]
  fn decode_empty_bytes() {
    let result = decode_image_bytes(&[]);
    assert!(matches!(
      result,
      Err(ImageDecodeError::EmptyImage { width: 0, height: 0 })
    ));
  }
}
