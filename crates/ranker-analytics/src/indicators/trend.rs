//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl MacdParams {
    /// 마지막 시점에 시그널까지 계산하려면 필요한 최소 데이터 수.
    pub fn required_len(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }
}

/// MACD 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdResult {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Option<Decimal>,
    /// 시그널 라인 (MACD의 EMA).
    pub signal: Option<Decimal>,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Option<Decimal>,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (처음 period-1개는 None)
    pub fn sma(
        &self,
        prices: &[Decimal],
        params: SmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

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

        let mut result = Vec::with_capacity(prices.len());
        let period_decimal = Decimal::from(period);

        for i in 0..prices.len() {
            if i < period - 1 {
                result.push(None);
            } else {
                let sum: Decimal = prices[i + 1 - period..=i].iter().sum();
                result.push(Some(sum / period_decimal));
            }
        }

        Ok(result)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × k) + (이전 EMA × (1 - k)), k = 2 / (period + 1)
    ///
    /// 첫 EMA 값은 처음 period개의 SMA입니다.
    pub fn ema(
        &self,
        prices: &[Decimal],
        params: EmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

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

        let mut result = Vec::with_capacity(prices.len());
        let multiplier = dec!(2) / Decimal::from(period + 1);

        for _ in 0..period - 1 {
            result.push(None);
        }

        // 첫 EMA는 SMA로 시작
        let initial_sma: Decimal = prices[..period].iter().sum::<Decimal>() / Decimal::from(period);
        result.push(Some(initial_sma));

        let mut prev_ema = initial_sma;
        for price in prices.iter().skip(period) {
            let ema = (*price * multiplier) + (prev_ema * (Decimal::ONE - multiplier));
            result.push(Some(ema));
            prev_ema = ema;
        }

        Ok(result)
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인의 EMA
    /// 히스토그램 = MACD 라인 - 시그널 라인
    ///
    /// 마지막 시점의 시그널이 존재하려면 `slow + signal - 1`개가 필요합니다.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        if params.fast_period == 0 || params.signal_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "MACD 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if params.fast_period >= params.slow_period {
            return Err(IndicatorError::InvalidParameter(format!(
                "단기 기간({})은 장기 기간({})보다 작아야 합니다",
                params.fast_period, params.slow_period
            )));
        }

        let min_required = params.required_len();
        if prices.len() < min_required {
            return Err(IndicatorError::InsufficientData {
                required: min_required,
                provided: prices.len(),
            });
        }

        let fast_ema = self.ema(
            prices,
            EmaParams {
                period: params.fast_period,
            },
        )?;
        let slow_ema = self.ema(
            prices,
            EmaParams {
                period: params.slow_period,
            },
        )?;

        let macd_line: Vec<Option<Decimal>> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(fast, slow)| match (fast, slow) {
                (Some(f), Some(s)) => Some(*f - *s),
                _ => None,
            })
            .collect();

        // 시그널 라인 (MACD 라인의 EMA)
        let macd_values: Vec<Decimal> = macd_line.iter().flatten().copied().collect();
        let signal_ema = self.ema(
            &macd_values,
            EmaParams {
                period: params.signal_period,
            },
        )?;

        let mut result = Vec::with_capacity(prices.len());
        let mut signal_idx = 0;

        for macd_val in macd_line.iter() {
            match macd_val {
                Some(m) => {
                    let signal = signal_ema.get(signal_idx).copied().flatten();
                    result.push(MacdResult {
                        macd: Some(*m),
                        signal,
                        histogram: signal.map(|s| *m - s),
                    });
                    signal_idx += 1;
                }
                None => result.push(MacdResult {
                    macd: None,
                    signal: None,
                    histogram: None,
                }),
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_prices() -> Vec<Decimal> {
        vec![
            dec!(100.0),
            dec!(102.0),
            dec!(101.0),
            dec!(103.0),
            dec!(105.0),
            dec!(104.0),
            dec!(106.0),
            dec!(108.0),
            dec!(107.0),
            dec!(109.0),
        ]
    }

    #[test]
    fn test_sma_basic() {
        let trend = TrendIndicators::new();
        let prices = sample_prices();

        let sma = trend.sma(&prices, SmaParams { period: 3 }).unwrap();

        assert!(sma[0].is_none());
        assert!(sma[1].is_none());

        // (100 + 102 + 101) / 3 = 101
        assert_eq!(sma[2], Some(dec!(101)));
        // (108 + 107 + 109) / 3 = 108
        assert_eq!(sma[9], Some(dec!(108)));
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let trend = TrendIndicators::new();
        let prices = sample_prices();

        let ema = trend.ema(&prices, EmaParams { period: 3 }).unwrap();

        assert!(ema[1].is_none());
        assert_eq!(ema[2], Some(dec!(101)));
        // k = 0.5: 103 * 0.5 + 101 * 0.5 = 102
        assert_eq!(ema[3], Some(dec!(102)));
    }

    #[test]
    fn test_zero_period_is_invalid() {
        let trend = TrendIndicators::new();
        let result = trend.sma(&sample_prices(), SmaParams { period: 0 });
        assert!(matches!(result, Err(IndicatorError::InvalidParameter(_))));
    }

    #[test]
    fn test_macd_minimum_length() {
        let trend = TrendIndicators::new();
        let params = MacdParams::default();

        let prices: Vec<Decimal> = (0..34).map(|i| Decimal::from(100 + i)).collect();
        let macd = trend.macd(&prices, params).unwrap();
        let last = macd.last().unwrap();
        assert!(last.signal.is_some());
        assert!(last.histogram.is_some());
        // 시그널이 처음 나오는 시점이 마지막 봉
        assert!(macd[32].signal.is_none());

        let short = &prices[..33];
        assert!(matches!(
            trend.macd(short, params),
            Err(IndicatorError::InsufficientData { required: 34, provided: 33 })
        ));
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let trend = TrendIndicators::new();
        let prices: Vec<Decimal> = (0..60).map(|i| Decimal::from(100 + i * 2)).collect();

        let macd = trend.macd(&prices, MacdParams::default()).unwrap();
        let last = macd.last().unwrap();

        assert!(last.macd.unwrap() > Decimal::ZERO);
    }
}
