// 该文件是 Qiushi （秋实） 项目的一部分。
// src/detector/decode.rs - 原始输出解码
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
use tracing::debug;

use crate::detector::core::RawCandidate;
use crate::tensor::RawOutput;

#[derive(Error, Debug)]
#[error("输出形状不匹配: 期望通道数 {expected}, 实际 {actual}")]
pub struct ShapeMismatchError {
  pub expected: usize,
  pub actual: usize,
}

/// 把检测头输出按候选拆成边框与分数向量
///
/// 检测头按通道主序输出 `[1, 4+K, N]`，这里完成转置：每个候选得到
/// 一个中心形式边框与 K 维分数向量。不做任何过滤；候选数 N 由模型
/// 决定（640 输入的 YOLO 头为 8400）。通道数与配置的类别数不一致
/// 说明模型与流水线版本不匹配，直接报错且不应重试。
pub fn decode(
  output: &RawOutput,
  num_classes: usize,
) -> Result<Vec<RawCandidate>, ShapeMismatchError> {
  let expected = 4 + num_classes;
  if output.channels() != expected {
    return Err(ShapeMismatchError {
      expected,
      actual: output.channels(),
    });
  }

  let anchors = output.anchors();
  let mut candidates = Vec::with_capacity(anchors);

  for i in 0..anchors {
    let bbox = [
      output.at(0, i),
      output.at(1, i),
      output.at(2, i),
      output.at(3, i),
    ];
    let scores: Box<[f32]> = (0..num_classes).map(|c| output.at(4 + c, i)).collect();
    candidates.push(RawCandidate { bbox, scores });
  }

  debug!("解码出 {} 个候选", candidates.len());
  Ok(candidates)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decode_splits_boxes_and_scores() {
    // 6 通道 × 2 候选，通道主序
    let data = vec![
      10.0, 20.0, // cx
      11.0, 21.0, // cy
      4.0, 6.0, // w
      5.0, 7.0, // h
      0.9, 0.1, // apple 分数
      0.2, 0.8, // damaged_apple 分数
    ];
    let output = RawOutput::new(data, 6, 2);
    let candidates = decode(&output, 2).unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].bbox, [10.0, 11.0, 4.0, 5.0]);
    assert_eq!(&*candidates[0].scores, &[0.9, 0.2]);
    assert_eq!(candidates[1].bbox, [20.0, 21.0, 6.0, 7.0]);
    assert_eq!(&*candidates[1].scores, &[0.1, 0.8]);
  }

  #[test]
  fn decode_rejects_wrong_channel_count() {
    let output = RawOutput::new(vec![0.0; 10], 5, 2);
    let err = decode(&output, 2).unwrap_err();
    assert_eq!(err.expected, 6);
    assert_eq!(err.actual, 5);
  }
}
