//! 종목 랭킹.
//!
//! 종합 점수 내림차순, 동점 시 심볼 오름차순으로 정렬한 뒤 상위 N개만 남깁니다.
//! 입력 순서와 무관하게 항상 같은 결과를 냅니다.
//!
//! # 예시
//!
//! ```rust,ignore
//! use ranker_analytics::ranking::Ranker;
//!
//! let ranked = Ranker::rank(results, 5);
//! for entry in ranked.iter() {
//!     println!("{} {} {:.1}", entry.rank, entry.score.symbol, entry.score.composite_score);
//! }
//! ```

use std::cmp::Ordering;

use ranker_core::{CompositeResult, ForecastResult, RankedList};

/// 종목 랭커.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    /// (점수, 예측) 쌍을 정렬하고 상위 `top_n`개를 반환합니다.
    pub fn rank(mut results: Vec<(CompositeResult, ForecastResult)>, top_n: usize) -> RankedList {
        results.sort_by(|(a, _), (b, _)| compare_scores(a, b));
        results.truncate(top_n);
        RankedList::from_sorted(results)
    }

    /// 이미 만들어진 랭킹을 다시 정렬합니다.
    pub fn rerank(list: RankedList, top_n: usize) -> RankedList {
        Self::rank(list.into_pairs(), top_n)
    }
}

/// 랭킹 순서: 종합 점수 내림차순, 심볼 오름차순.
pub fn compare_scores(a: &CompositeResult, b: &CompositeResult) -> Ordering {
    b.composite_score
        .total_cmp(&a.composite_score)
        .then_with(|| a.symbol.cmp(&b.symbol))
}
