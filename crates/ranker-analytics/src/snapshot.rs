//! 지표 스냅샷 생성.
//!
//! 가격 시계열 하나에서 점수 계산에 필요한 모든 지표를 한 번에 계산합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ranker_core::{IndicatorSnapshot, MacdSnapshot, PriceSeries};

use crate::indicators::{
    latest, to_f64, AtrParams, EmaParams, IndicatorEngine, IndicatorError, IndicatorResult,
    LevelsParams, MacdParams, MomentumParams, RsiParams, SmaParams, VolatilityParams,
    VolumeRatioParams,
};

/// 지표 기간 설정.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWindows {
    pub rsi: usize,
    pub sma_short: usize,
    pub sma_long: usize,
    pub macd: MacdParams,
    pub volume: usize,
    pub momentum: usize,
    /// 변동성 계산에 사용할 종가 개수
    pub volatility: usize,
    pub price_range: usize,
    pub levels: usize,
    pub atr: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            rsi: 14,
            sma_short: 20,
            sma_long: 50,
            macd: MacdParams::default(),
            volume: 20,
            momentum: 10,
            volatility: 20,
            price_range: 20,
            levels: 90,
            atr: 14,
        }
    }
}

/// `InsufficientData`만 `None`으로 바꾸고 나머지 에러는 그대로 전파합니다.
fn optional<T>(result: IndicatorResult<T>) -> IndicatorResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(IndicatorError::InsufficientData { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// 마지막 일봉 기준 지표 스냅샷을 계산합니다.
///
/// 상대 위치는 `current_price` 기준입니다.
/// 장기 지표(SMA 장기, EMA 장기, MACD)는 데이터가 부족하면 `None`이 되고,
/// 나머지 지표의 데이터 부족은 에러로 전파됩니다.
pub fn compute_snapshot(
    engine: &IndicatorEngine,
    series: &PriceSeries,
    current_price: Decimal,
    windows: &IndicatorWindows,
) -> IndicatorResult<IndicatorSnapshot> {
    let closes = series.closes();
    let volumes = series.volumes();
    let bars = series.bars();

    let insufficient = |required: usize| IndicatorError::InsufficientData {
        required,
        provided: closes.len(),
    };

    let rsi = latest(&engine.rsi(&closes, RsiParams { period: windows.rsi })?)
        .ok_or_else(|| insufficient(windows.rsi + 1))?;
    let sma_20 = latest(&engine.sma(&closes, SmaParams { period: windows.sma_short })?)
        .ok_or_else(|| insufficient(windows.sma_short))?;
    let ema_12 = latest(&engine.ema(
        &closes,
        EmaParams {
            period: windows.macd.fast_period,
        },
    )?)
    .ok_or_else(|| insufficient(windows.macd.fast_period))?;

    let sma_50 = optional(engine.sma(&closes, SmaParams { period: windows.sma_long }))?
        .and_then(|v| latest(&v));
    let ema_26 = optional(engine.ema(
        &closes,
        EmaParams {
            period: windows.macd.slow_period,
        },
    ))?
    .and_then(|v| latest(&v));

    let macd = match optional(engine.macd(&closes, windows.macd))? {
        Some(values) => match values.last() {
            Some(last) => match (last.macd, last.signal, last.histogram) {
                (Some(line), Some(signal), Some(histogram)) => Some(MacdSnapshot {
                    line: to_f64(line)?,
                    signal: to_f64(signal)?,
                    histogram: to_f64(histogram)?,
                }),
                _ => None,
            },
            None => None,
        },
        None => None,
    };

    let volume_ratio = engine.volume_ratio(
        &volumes,
        VolumeRatioParams {
            period: windows.volume,
        },
    )?;
    let momentum = engine.momentum(
        &closes,
        MomentumParams {
            period: windows.momentum,
        },
    )?;
    let volatility = engine.volatility(
        &closes,
        VolatilityParams {
            window: windows.volatility,
        },
    )?;
    let price_range = engine.price_range(&closes, windows.price_range)?;
    let levels = engine.support_resistance(
        bars,
        LevelsParams {
            period: windows.levels,
        },
    )?;
    let atr = engine.atr(
        bars,
        AtrParams {
            period: windows.atr,
        },
    )?;

    let snapshot = IndicatorSnapshot {
        rsi: to_f64(rsi)?,
        macd,
        sma_20: to_f64(sma_20)?,
        sma_50: sma_50.map(to_f64).transpose()?,
        ema_12: to_f64(ema_12)?,
        ema_26: ema_26.map(to_f64).transpose()?,
        volume_ratio: to_f64(volume_ratio)?,
        momentum_10d: to_f64(momentum)?,
        volatility: volatility.annualized_pct,
        price_range_20d: to_f64(price_range)?,
        support: to_f64(levels.support)?,
        resistance: to_f64(levels.resistance)?,
        relative_position: to_f64(levels.relative_position(current_price))?,
        levels_days: levels.days,
        atr_14: to_f64(atr)?,
    };

    debug!(
        symbol = %series.symbol(),
        rsi = snapshot.rsi,
        volume_ratio = snapshot.volume_ratio,
        volatility = snapshot.volatility,
        has_macd = snapshot.macd.is_some(),
        "Indicator snapshot computed"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ranker_core::{PriceBar, Symbol};
    use rust_decimal_macros::dec;

    fn linear_series(len: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..len)
            .map(|i| {
                let close = dec!(100) + Decimal::from(i as u64) * dec!(0.5);
                let date = start + chrono::Days::new(i as u64);
                PriceBar::new(date, close, close + dec!(1), close - dec!(1), close, dec!(1000))
            })
            .collect();
        PriceSeries::new(Symbol::new("LIN").unwrap(), bars).unwrap()
    }

    #[test]
    fn test_short_history_leaves_long_indicators_empty() {
        let engine = IndicatorEngine::new();
        let series = linear_series(30);
        let price = series.last_close().unwrap();

        let snapshot =
            compute_snapshot(&engine, &series, price, &IndicatorWindows::default()).unwrap();

        assert!(snapshot.sma_50.is_none());
        assert!(snapshot.macd.is_none());
        assert!(snapshot.ema_26.is_some());
        assert_eq!(snapshot.levels_days, 30);
        assert_eq!(snapshot.rsi, 100.0);
        assert_eq!(snapshot.volume_ratio, 1.0);
        // (114.5 - 99) / (115.5 - 99)
        assert!((snapshot.relative_position - 15.5 / 16.5).abs() < 1e-9);
    }

    #[test]
    fn test_long_history_fills_everything() {
        let engine = IndicatorEngine::new();
        let series = linear_series(120);
        let price = series.last_close().unwrap();

        let snapshot =
            compute_snapshot(&engine, &series, price, &IndicatorWindows::default()).unwrap();

        assert!(snapshot.sma_50.is_some());
        let macd = snapshot.macd.unwrap();
        assert!(macd.line > 0.0);
        assert_eq!(snapshot.levels_days, 90);
        assert!((snapshot.atr_14 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_short_series_is_insufficient() {
        let engine = IndicatorEngine::new();
        let series = linear_series(10);

        let result = compute_snapshot(&engine, &series, dec!(100), &IndicatorWindows::default());
        assert!(matches!(
            result,
            Err(IndicatorError::InsufficientData { .. })
        ));
    }
}
