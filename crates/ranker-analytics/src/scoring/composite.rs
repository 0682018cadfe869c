//! 종합 점수 계산기.
//!
//! # 계산 순서
//!
//! 1. 지표 스냅샷 계산 (데이터 부족 시 `InsufficientData`)
//! 2. 지표별 0-100 점수 (RSI, MACD, 이동평균, 거래량, 모멘텀)
//! 3. 정규화된 가중치로 가중 합산
//! 4. 박스권 보너스 가산 (상한 100)
//! 5. 상승 확률 = `derive_probability(종합 점수)`
//! 6. 돌파 조건 평가
//! 7. 매매 셋업 분류 및 신뢰도 평가 (점수에는 영향 없음)

use rust_decimal::Decimal;
use tracing::debug;

use ranker_core::{
    CompositeResult, IndicatorSnapshot, MacdSnapshot, MarketRegime, PriceSeries, SubScores,
};

use super::params::ScoringParams;
use super::setup::{analyze_setup, assess_confidence};
use super::{derive_probability, ScoringError, ScoringResult};
use crate::indicators::{to_f64, IndicatorEngine};
use crate::snapshot::compute_snapshot;

/// 종합 점수 계산기.
///
/// 파라미터는 생성 시점에 검증되며 이후 변경되지 않습니다.
#[derive(Debug)]
pub struct CompositeScorer {
    engine: IndicatorEngine,
    params: ScoringParams,
}

impl CompositeScorer {
    /// 파라미터를 검증하고 계산기를 생성합니다.
    pub fn new(params: ScoringParams) -> ScoringResult<Self> {
        params.validate()?;
        Ok(Self {
            engine: IndicatorEngine::new(),
            params,
        })
    }

    /// 현재 파라미터.
    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// 종목의 종합 점수를 계산합니다.
    ///
    /// # 에러
    /// - `InvalidParameter`: 현재가가 0 이하
    /// - `InsufficientData`: 일봉 수가 `min_bars` 미만이거나 지표 기간보다 짧음
    pub fn score(&self, series: &PriceSeries, current_price: Decimal) -> ScoringResult<CompositeResult> {
        if current_price <= Decimal::ZERO {
            return Err(ScoringError::InvalidParameter(format!(
                "현재가는 0보다 커야 합니다: {}",
                current_price
            )));
        }

        if series.len() < self.params.min_bars {
            return Err(ScoringError::InsufficientData {
                required: self.params.min_bars,
                provided: series.len(),
            });
        }

        let snapshot = compute_snapshot(&self.engine, series, current_price, &self.params.windows)?;
        let price = to_f64(current_price)?;

        let sub_scores = self.sub_scores(&snapshot, price);
        let base_score = self.weighted_sum(&sub_scores);
        let flat_range_bonus = self.params.flat_range.bonus(
            snapshot.volatility,
            snapshot.price_range_20d,
            snapshot.rsi,
        );
        let composite_score = (base_score + flat_range_bonus).clamp(0.0, 100.0);

        let breakout_filters = self.params.breakout.evaluate(&snapshot);

        let regime = MarketRegime::classify(price, snapshot.sma_20, snapshot.sma_50);
        let setup = analyze_setup(&snapshot, price, regime);
        let confidence = assess_confidence(
            sub_scores.moving_average,
            snapshot.volume_ratio,
            snapshot.volatility,
            setup.rr_ratio,
        );

        debug!(
            symbol = %series.symbol(),
            base_score,
            flat_range_bonus,
            composite_score,
            breakout = breakout_filters.breakout_signal,
            strategy = %setup.strategy,
            "Composite score computed"
        );

        Ok(CompositeResult {
            symbol: series.symbol().clone(),
            current_price: price,
            composite_score,
            probability: derive_probability(composite_score),
            base_score,
            flat_range_bonus,
            sub_scores,
            indicators: snapshot,
            breakout_filters,
            setup,
            confidence,
        })
    }

    /// 지표별 점수를 계산합니다.
    pub fn sub_scores(&self, snapshot: &IndicatorSnapshot, price: f64) -> SubScores {
        let tables = &self.params.tables;
        SubScores {
            rsi: tables.rsi.lookup(snapshot.rsi),
            macd: macd_score(snapshot.macd, price, self.params.macd_hist_scale),
            moving_average: moving_average_score(snapshot, price),
            volume: tables.volume.lookup(snapshot.volume_ratio),
            momentum: tables.momentum.lookup(snapshot.momentum_10d),
        }
    }

    fn weighted_sum(&self, sub_scores: &SubScores) -> f64 {
        self.params
            .weights
            .normalized()
            .iter()
            .zip(sub_scores.as_array().iter())
            .map(|(w, s)| w * s)
            .sum()
    }
}

/// MACD 점수.
///
/// - 히스토그램 > 0 이고 라인 > 시그널: 80 + min(20, |hist| / 가격 × 100 × scale)
/// - 히스토그램 > 0 만: 60
/// - 라인 > 시그널 만: 55
/// - 그 외 또는 MACD 없음: 30
pub fn macd_score(macd: Option<MacdSnapshot>, price: f64, hist_scale: f64) -> f64 {
    let Some(macd) = macd else {
        return 30.0;
    };

    let positive_hist = macd.histogram > 0.0;
    let line_above = macd.is_line_above_signal();

    match (positive_hist, line_above) {
        (true, true) => {
            let strength = if price > 0.0 {
                macd.histogram.abs() / price * 100.0 * hist_scale
            } else {
                0.0
            };
            (80.0 + strength.min(20.0)).min(100.0)
        }
        (true, false) => 60.0,
        (false, true) => 55.0,
        (false, false) => 30.0,
    }
}

/// 이동평균 점수: 현재가가 위에 있는 이동평균 비율 × 100.
///
/// 계산 가능한 이동평균만 분모에 포함합니다.
pub fn moving_average_score(snapshot: &IndicatorSnapshot, price: f64) -> f64 {
    let averages = snapshot.available_moving_averages();
    if averages.is_empty() {
        return 0.0;
    }
    let above = averages.iter().filter(|ma| price > **ma).count();
    above as f64 / averages.len() as f64 * 100.0
}
