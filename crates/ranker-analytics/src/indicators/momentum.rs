//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정하는 지표들을 제공합니다.
//! - RSI (Relative Strength Index, Wilder 평활)
//! - N일 가격 모멘텀 (%)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MomentumParams {
    /// 비교 기간 (기본: 10).
    pub period: usize,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self { period: 10 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS)), RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 첫 평균은 처음 period개 변화량의 단순 평균이고, 이후에는
    /// `avg = (이전 avg × (period - 1) + 현재값) / period`로 평활합니다.
    /// 하락폭 평균이 0이면 100, 상승/하락 모두 0이면 50입니다.
    ///
    /// # 반환
    /// 0-100 사이의 RSI 값들 (처음 period개는 None)
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period + 1 {
            return Err(IndicatorError::InsufficientData {
                required: period + 1,
                provided: prices.len(),
            });
        }

        let mut gains = Vec::with_capacity(prices.len() - 1);
        let mut losses = Vec::with_capacity(prices.len() - 1);
        for pair in prices.windows(2) {
            let delta = pair[1] - pair[0];
            gains.push(delta.max(Decimal::ZERO));
            losses.push((-delta).max(Decimal::ZERO));
        }

        let period_decimal = Decimal::from(period);
        let prev_weight = Decimal::from(period - 1);

        let mut avg_gain = gains[..period].iter().sum::<Decimal>() / period_decimal;
        let mut avg_loss = losses[..period].iter().sum::<Decimal>() / period_decimal;

        let mut result: Vec<Option<Decimal>> = vec![None; period];
        result.push(Some(Self::rsi_value(avg_gain, avg_loss)));

        for i in period..gains.len() {
            avg_gain = (avg_gain * prev_weight + gains[i]) / period_decimal;
            avg_loss = (avg_loss * prev_weight + losses[i]) / period_decimal;
            result.push(Some(Self::rsi_value(avg_gain, avg_loss)));
        }

        Ok(result)
    }

    fn rsi_value(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
        if avg_loss == Decimal::ZERO {
            if avg_gain == Decimal::ZERO {
                return dec!(50);
            }
            return dec!(100);
        }
        // 하락폭 평균이 극히 작으면 RS가 Decimal 범위를 넘으므로 100으로 처리
        let Some(denominator) = avg_gain
            .checked_div(avg_loss)
            .and_then(|rs| rs.checked_add(Decimal::ONE))
        else {
            return dec!(100);
        };
        let rsi = dec!(100) - (dec!(100) / denominator);
        rsi.max(Decimal::ZERO).min(dec!(100))
    }

    /// N일 가격 모멘텀 (%).
    ///
    /// (현재가 - N일 전 가격) / N일 전 가격 × 100
    ///
    /// # 에러
    /// - N+1개 미만이면 `InsufficientData`
    /// - N일 전 가격이 0이면 `DegenerateInput`
    pub fn momentum_pct(&self, prices: &[Decimal], params: MomentumParams) -> IndicatorResult<Decimal> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period + 1 {
            return Err(IndicatorError::InsufficientData {
                required: period + 1,
                provided: prices.len(),
            });
        }

        let current = prices[prices.len() - 1];
        let base = prices[prices.len() - 1 - period];

        if base == Decimal::ZERO {
            return Err(IndicatorError::DegenerateInput(format!(
                "{}일 전 가격이 0입니다",
                period
            )));
        }

        Ok((current - base) / base * dec!(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_strictly_increasing_is_100() {
        let calc = MomentumCalculator::new();
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + i)).collect();

        let rsi = calc.rsi(&prices, RsiParams::default()).unwrap();
        assert!(rsi[13].is_none());
        assert_eq!(rsi[14], Some(dec!(100)));
        assert_eq!(*rsi.last().unwrap(), Some(dec!(100)));
    }

    #[test]
    fn test_rsi_strictly_decreasing_is_0() {
        let calc = MomentumCalculator::new();
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(200 - i)).collect();

        let rsi = calc.rsi(&prices, RsiParams::default()).unwrap();
        assert_eq!(*rsi.last().unwrap(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_rsi_constant_is_neutral() {
        let calc = MomentumCalculator::new();
        let prices = vec![dec!(50); 20];

        let rsi = calc.rsi(&prices, RsiParams::default()).unwrap();
        assert_eq!(*rsi.last().unwrap(), Some(dec!(50)));
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        let calc = MomentumCalculator::new();
        // 변화량: +2, -1, +2, -1 (period 2)
        let prices = vec![dec!(10), dec!(12), dec!(11), dec!(13), dec!(12)];

        let rsi = calc.rsi(&prices, RsiParams { period: 2 }).unwrap();
        // 초기: gain 1, loss 0.5 → RS 2 → 66.66..
        let first = rsi[2].unwrap();
        assert!((first - dec!(66.666)).abs() < dec!(0.01));
        // 다음: gain (1 + 2)/2 = 1.5, loss (0.5 + 0)/2 = 0.25 → RS 6 → 85.71..
        let second = rsi[3].unwrap();
        assert!((second - dec!(85.714)).abs() < dec!(0.01));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let calc = MomentumCalculator::new();
        let prices = vec![dec!(1); 14];

        assert!(matches!(
            calc.rsi(&prices, RsiParams::default()),
            Err(IndicatorError::InsufficientData { required: 15, provided: 14 })
        ));
    }

    #[test]
    fn test_momentum_pct() {
        let calc = MomentumCalculator::new();
        let prices = vec![dec!(100), dec!(101), dec!(102), dec!(110)];

        let momentum = calc.momentum_pct(&prices, MomentumParams { period: 3 }).unwrap();
        assert_eq!(momentum, dec!(10));
    }

    #[test]
    fn test_momentum_zero_base_is_degenerate() {
        let calc = MomentumCalculator::new();
        let prices = vec![dec!(0), dec!(1), dec!(2)];

        assert!(matches!(
            calc.momentum_pct(&prices, MomentumParams { period: 2 }),
            Err(IndicatorError::DegenerateInput(_))
        ));
    }
}
