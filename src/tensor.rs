// 该文件是 Qiushi （秋实） 项目的一部分。
// src/tensor.rs - 张量定义
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

const RGB_CHANNELS: usize = 3;

/// 模型输入张量
///
/// NCHW 布局，batch 固定为 1，每通道取值范围 [0, 1]。
#[derive(Debug, Clone)]
pub struct InputTensor {
  data: Box<[f32]>,
  width: u32,
  height: u32,
}

impl InputTensor {
  pub fn new(data: Vec<f32>, width: u32, height: u32) -> Self {
    let expected = RGB_CHANNELS * width as usize * height as usize;
    if data.len() != expected {
      panic!("数据长度不匹配: 期望长度 {}, 实际长度 {}", expected, data.len());
    }

    Self {
      data: data.into_boxed_slice(),
      width,
      height,
    }
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn channels(&self) -> usize {
    RGB_CHANNELS
  }

  pub fn batch(&self) -> usize {
    1
  }

  pub fn as_slice(&self) -> &[f32] {
    &self.data
  }
}

/// 模型原始输出
///
/// 检测头按通道主序排列（即 `[1, 4+K, N]`），`at(c, i)` 取第 i 个候选在
/// 第 c 个通道上的值。
#[derive(Debug, Clone)]
pub struct RawOutput {
  data: Box<[f32]>,
  channels: usize,
  anchors: usize,
}

impl RawOutput {
  pub fn new(data: Vec<f32>, channels: usize, anchors: usize) -> Self {
    let expected = channels * anchors;
    if data.len() != expected {
      panic!("数据长度不匹配: 期望长度 {}, 实际长度 {}", expected, data.len());
    }

    Self {
      data: data.into_boxed_slice(),
      channels,
      anchors,
    }
  }

  pub fn channels(&self) -> usize {
    self.channels
  }

  pub fn anchors(&self) -> usize {
    self.anchors
  }

  pub fn at(&self, channel: usize, anchor: usize) -> f32 {
    self.data[channel * self.anchors + anchor]
  }
}
