// 该文件是 Qiushi （秋实） 项目的一部分。
// src/detector/filter.rs - 置信度过滤
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

use crate::detector::core::{Candidate, RawCandidate};

/// 置信度过滤与类别归并
///
/// 每个候选取分数向量的最大值作为置信度、最大值下标作为类别
/// （同分取下标较小者），仅保留严格大于阈值的候选：恰好等于阈值
/// 的候选被丢弃。空结果是常态而非错误。
pub fn filter(candidates: &[RawCandidate], confidence_threshold: f32) -> Vec<Candidate> {
  let mut kept = Vec::new();

  for candidate in candidates {
    if candidate.scores.is_empty() {
      continue;
    }

    let mut class_id = 0usize;
    let mut confidence = candidate.scores[0];
    for (c, &score) in candidate.scores.iter().enumerate().skip(1) {
      if score > confidence {
        confidence = score;
        class_id = c;
      }
    }

    if confidence > confidence_threshold {
      kept.push(Candidate {
        bbox: candidate.bbox,
        class_id,
        confidence,
      });
    }
  }

  kept
}
