//! 랭킹 결과 레코드.

use serde::{Deserialize, Serialize};

use super::forecast::ForecastResult;
use super::score::CompositeResult;

/// 점수와 예측을 묶은 랭킹 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1부터 시작하는 순위
    pub rank: usize,
    pub score: CompositeResult,
    pub forecast: ForecastResult,
}

/// 종합 점수 내림차순, 동점 시 심볼 오름차순으로 정렬된 상위 N개 목록.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedList {
    entries: Vec<RankedEntry>,
}

impl RankedList {
    /// 이미 정렬된 항목으로 목록을 만듭니다. 순위는 위치로 다시 매깁니다.
    pub fn from_sorted(pairs: Vec<(CompositeResult, ForecastResult)>) -> Self {
        let entries = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (score, forecast))| RankedEntry {
                rank: i + 1,
                score,
                forecast,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1위 항목.
    pub fn top(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }

    /// (점수, 예측) 쌍으로 되돌립니다.
    pub fn into_pairs(self) -> Vec<(CompositeResult, ForecastResult)> {
        self.entries
            .into_iter()
            .map(|e| (e.score, e.forecast))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for RankedList {
    type Item = RankedEntry;
    type IntoIter = std::vec::IntoIter<RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
