//! 지표 / 점수 범위 속성 테스트
//!
//! 임의의 양수 가격 시계열에서 RSI, 하위 점수, 종합 점수가
//! 항상 0-100 범위에 있는지 검증

use chrono::NaiveDate;
use proptest::prelude::*;
use ranker_analytics::{CompositeScorer, IndicatorEngine, RsiParams, ScoringParams};
use ranker_core::{PriceBar, PriceSeries, Symbol};
use rust_decimal::Decimal;

/// 센트 단위 가격 목록으로 일봉 시계열 생성
fn series_from_cents(cents: &[u32], volumes: &[u32]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let bars = cents
        .iter()
        .zip(volumes.iter().cycle())
        .enumerate()
        .map(|(i, (c, v))| {
            let close = Decimal::new(i64::from(*c), 2);
            let date = start + chrono::Days::new(i as u64);
            PriceBar::new(
                date,
                close,
                close * Decimal::new(101, 2),
                close * Decimal::new(99, 2),
                close,
                Decimal::from(*v),
            )
        })
        .collect();
    PriceSeries::new(Symbol::new("PROP").unwrap(), bars).unwrap()
}

proptest! {
    #[test]
    fn prop_rsi_stays_in_range(cents in prop::collection::vec(100u32..100_000, 15..80)) {
        let engine = IndicatorEngine::new();
        let closes: Vec<Decimal> = cents.iter().map(|c| Decimal::new(i64::from(*c), 2)).collect();

        let values = engine.rsi(&closes, RsiParams::default()).unwrap();
        prop_assert_eq!(values.len(), closes.len());
        for value in values.into_iter().flatten() {
            prop_assert!(value >= Decimal::ZERO);
            prop_assert!(value <= Decimal::ONE_HUNDRED);
        }
    }

    #[test]
    fn prop_scores_stay_in_range(
        cents in prop::collection::vec(500u32..50_000, 20..120),
        volumes in prop::collection::vec(1u32..1_000_000, 1..10),
    ) {
        let scorer = CompositeScorer::new(ScoringParams::default()).unwrap();
        let series = series_from_cents(&cents, &volumes);
        let price = series.last_close().unwrap();

        let result = scorer.score(&series, price).unwrap();

        for score in result.sub_scores.as_array() {
            prop_assert!((0.0..=100.0).contains(&score), "sub score {}", score);
        }
        prop_assert!((0.0..=100.0).contains(&result.composite_score));
        prop_assert!((0.0..=100.0).contains(&result.probability));
        prop_assert!((0.0..=1.0).contains(&result.indicators.relative_position));
        prop_assert!(result.indicators.volatility >= 0.0);
    }
}
