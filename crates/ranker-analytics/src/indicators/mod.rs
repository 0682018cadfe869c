//! 기술적 지표 모듈.
//!
//! 종목 점수 계산에 사용되는 기술적 지표를 제공합니다.
//! 모든 함수는 순수 함수이며 시계열의 마지막 일봉 기준으로 계산합니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표
//! - **SMA / EMA**: 단순 / 지수 이동평균
//! - **MACD**: 라인, 시그널, 히스토그램
//!
//! ## 모멘텀 지표
//! - **RSI**: 상대강도지수 (Wilder 평활)
//! - **모멘텀**: N일 가격 변화율
//!
//! ## 변동성 지표
//! - **변동성**: 일간 수익률 표준편차, 연환산
//! - **ATR**: 평균 실제 범위
//! - **가격 범위**: N일 (최고 - 최저) / 최저
//!
//! ## 거래량 / 가격 구조
//! - **거래량 비율**: 최근 / N일 평균
//! - **지지/저항**: N일 최저가/최고가, 상대 위치
//!
//! # 사용 예시
//!
//! ```ignore
//! use ranker_analytics::indicators::{IndicatorEngine, RsiParams, SmaParams};
//!
//! let engine = IndicatorEngine::new();
//! let sma = engine.sma(&closes, SmaParams { period: 20 })?;
//! let rsi = engine.rsi(&closes, RsiParams { period: 14 })?;
//! ```

pub mod levels;
pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

use rust_decimal::Decimal;
use thiserror::Error;

use ranker_core::{DecimalExt, PriceBar};

pub use levels::{LevelIndicators, LevelsParams, SupportResistance};
pub use momentum::{MomentumCalculator, MomentumParams, RsiParams};
pub use trend::{EmaParams, MacdParams, MacdResult, SmaParams, TrendIndicators};
pub use volatility::{
    AtrParams, VolatilityIndicators, VolatilityParams, VolatilityResult, TRADING_DAYS_PER_YEAR,
};
pub use volume::{VolumeIndicators, VolumeRatioParams};

/// 지표 계산 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 불가능한 입력 (0 가격 등)
    #[error("계산 불가능한 입력: {0}")]
    DegenerateInput(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Decimal 지표 값을 f64로 변환합니다.
pub(crate) fn to_f64(value: Decimal) -> IndicatorResult<f64> {
    value
        .to_f64_checked()
        .ok_or_else(|| IndicatorError::CalculationError(format!("f64 변환 실패: {}", value)))
}

/// 시계열의 마지막 값을 꺼냅니다 (없으면 `None`).
pub fn latest(values: &[Option<Decimal>]) -> Option<Decimal> {
    values.last().copied().flatten()
}

/// 통합 지표 엔진.
///
/// 모든 기술적 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
    volume: VolumeIndicators,
    levels: LevelIndicators,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 추세 지표 ====================

    /// 단순 이동평균 (SMA). 처음 period-1개는 None.
    pub fn sma(&self, prices: &[Decimal], params: SmaParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.sma(prices, params)
    }

    /// 지수 이동평균 (EMA). 처음 period-1개는 None.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.ema(prices, params)
    }

    /// MACD 라인, 시그널 라인, 히스토그램.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        self.trend.macd(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI (0-100). 처음 period개는 None.
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.rsi(prices, params)
    }

    /// N일 가격 모멘텀 (%).
    pub fn momentum(&self, prices: &[Decimal], params: MomentumParams) -> IndicatorResult<Decimal> {
        self.momentum.momentum_pct(prices, params)
    }

    // ==================== 변동성 지표 ====================

    /// 일간/연환산 변동성.
    pub fn volatility(
        &self,
        prices: &[Decimal],
        params: VolatilityParams,
    ) -> IndicatorResult<VolatilityResult> {
        self.volatility.volatility(prices, params)
    }

    /// ATR (Average True Range).
    pub fn atr(&self, bars: &[PriceBar], params: AtrParams) -> IndicatorResult<Decimal> {
        self.volatility.atr(bars, params)
    }

    /// N일 가격 범위 (%).
    pub fn price_range(&self, prices: &[Decimal], period: usize) -> IndicatorResult<Decimal> {
        self.volatility.price_range_pct(prices, period)
    }

    // ==================== 거래량 / 가격 구조 ====================

    /// 거래량 비율 (최근 / 평균).
    pub fn volume_ratio(
        &self,
        volumes: &[Decimal],
        params: VolumeRatioParams,
    ) -> IndicatorResult<Decimal> {
        self.volume.volume_ratio(volumes, params)
    }

    /// 지지선 / 저항선.
    pub fn support_resistance(
        &self,
        bars: &[PriceBar],
        params: LevelsParams,
    ) -> IndicatorResult<SupportResistance> {
        self.levels.support_resistance(bars, params)
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
            dec!(111.0),
            dec!(110.0),
            dec!(112.0),
            dec!(114.0),
            dec!(113.0),
        ]
    }

    #[test]
    fn test_sma_calculation() {
        let engine = IndicatorEngine::new();
        let prices = sample_prices();

        let sma = engine.sma(&prices, SmaParams { period: 5 }).unwrap();

        assert!(sma[0].is_none());
        assert!(sma[3].is_none());
        assert!(sma[4].is_some());
        assert_eq!(latest(&sma), Some(dec!(112)));
    }

    #[test]
    fn test_rsi_calculation() {
        let engine = IndicatorEngine::new();
        let prices = sample_prices();

        let rsi = engine.rsi(&prices, RsiParams { period: 14 }).unwrap();

        for value in rsi.iter().flatten() {
            assert!(*value >= Decimal::ZERO);
            assert!(*value <= dec!(100));
        }
        assert!(latest(&rsi).is_some());
    }

    #[test]
    fn test_insufficient_data_error() {
        let engine = IndicatorEngine::new();
        let prices = vec![dec!(100.0), dec!(101.0)];

        let result = engine.sma(&prices, SmaParams { period: 20 });
        assert_eq!(
            result.unwrap_err(),
            IndicatorError::InsufficientData {
                required: 20,
                provided: 2
            }
        );
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(dec!(1.5)).unwrap(), 1.5);
    }
}
