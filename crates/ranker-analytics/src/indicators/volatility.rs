//! 변동성 지표 (Volatility Indicators).
//!
//! - 수익률 표준편차 기반 일간/연환산 변동성
//! - ATR (Average True Range)
//! - N일 가격 범위 (%)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use ranker_core::{DecimalExt, PriceBar};

use super::{IndicatorError, IndicatorResult};

/// 연간 거래일 수.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// 변동성 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolatilityParams {
    /// 사용할 종가 개수 (수익률은 window - 1개).
    pub window: usize,
}

impl Default for VolatilityParams {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// 변동성 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityResult {
    /// 일간 수익률 표준편차 (비율, 0.02 = 2%)
    pub daily: f64,
    /// 연환산 변동성 (%, daily × √252 × 100)
    pub annualized_pct: f64,
}

/// ATR 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtrParams {
    /// ATR 기간 (기본: 14).
    pub period: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 최근 `window`개 종가의 일간 수익률 표본 표준편차(n-1).
    ///
    /// # 에러
    /// - window < 3 이면 `InvalidParameter`
    /// - 종가가 window개 미만이면 `InsufficientData`
    /// - 직전 종가가 0이면 `DegenerateInput`
    pub fn volatility(
        &self,
        prices: &[Decimal],
        params: VolatilityParams,
    ) -> IndicatorResult<VolatilityResult> {
        let window = params.window;

        if window < 3 {
            return Err(IndicatorError::InvalidParameter(format!(
                "변동성 윈도우는 3 이상이어야 합니다: {}",
                window
            )));
        }

        if prices.len() < window {
            return Err(IndicatorError::InsufficientData {
                required: window,
                provided: prices.len(),
            });
        }

        let recent = &prices[prices.len() - window..];
        let returns = recent
            .windows(2)
            .map(|pair| {
                if pair[0] == Decimal::ZERO {
                    return Err(IndicatorError::DegenerateInput(
                        "수익률 계산 기준 가격이 0입니다".to_string(),
                    ));
                }
                let ret = (pair[1] - pair[0]) / pair[0];
                ret.to_f64_checked().ok_or_else(|| {
                    IndicatorError::CalculationError("Decimal to f64 변환 실패".to_string())
                })
            })
            .collect::<IndicatorResult<Vec<f64>>>()?;

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let daily = variance.max(0.0).sqrt();

        Ok(VolatilityResult {
            daily,
            annualized_pct: daily * TRADING_DAYS_PER_YEAR.sqrt() * 100.0,
        })
    }

    /// ATR (Average True Range) 계산.
    ///
    /// 최근 period개 True Range의 단순 평균입니다.
    /// 각 True Range는 전일 종가가 필요하므로 period+1개 일봉이 필요합니다.
    pub fn atr(&self, bars: &[PriceBar], params: AtrParams) -> IndicatorResult<Decimal> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if bars.len() < period + 1 {
            return Err(IndicatorError::InsufficientData {
                required: period + 1,
                provided: bars.len(),
            });
        }

        let recent = &bars[bars.len() - period - 1..];
        let sum: Decimal = recent
            .windows(2)
            .map(|pair| pair[1].true_range(pair[0].close))
            .sum();

        Ok(sum / Decimal::from(period))
    }

    /// 최근 period개 종가의 가격 범위 (%).
    ///
    /// (최고 - 최저) / 최저 × 100
    pub fn price_range_pct(&self, prices: &[Decimal], period: usize) -> IndicatorResult<Decimal> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: prices.len(),
            });
        }

        let recent = &prices[prices.len() - period..];
        let (min, max) = recent
            .iter()
            .fold((recent[0], recent[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));

        if min == Decimal::ZERO {
            return Err(IndicatorError::DegenerateInput(
                "가격 범위 최저가가 0입니다".to_string(),
            ));
        }

        Ok((max - min) / min * dec!(100))
    }
}
