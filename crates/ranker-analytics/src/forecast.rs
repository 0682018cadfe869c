//! 가격 예측.
//!
//! 최근 20일 종가에 최소제곱 추세선을 적합하고 예측 기간만큼 연장합니다.
//! 변동성으로 80% / 95% 신뢰 구간을 계산합니다.
//!
//! ```text
//! expected      = 추세선(마지막 인덱스 + horizon)
//! forecast_vol  = daily_vol × √horizon
//! ci80          = expected ± 1.28 × forecast_vol × 현재가
//! ci95          = expected ± 2.00 × forecast_vol × 현재가
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use ranker_core::{ConfidenceInterval, ForecastResult, PriceSeries, PriceTargets};

use crate::indicators::{to_f64, IndicatorEngine, IndicatorError, VolatilityParams};

/// 가격 예측 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// 데이터 부족
    #[error("데이터 부족: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 지표 계산 오류
    #[error("지표 계산 실패: {0}")]
    Indicator(IndicatorError),
}

impl From<IndicatorError> for ForecastError {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::InsufficientData { required, provided } => {
                Self::InsufficientData { required, provided }
            }
            IndicatorError::InvalidParameter(msg) => Self::InvalidParameter(msg),
            other => Self::Indicator(other),
        }
    }
}

/// 예측 결과 타입.
pub type ForecastOutcome<T> = Result<T, ForecastError>;

/// 가격 예측 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParams {
    /// 추세선 적합에 사용할 종가 수
    pub trend_window: usize,
    /// 변동성 계산에 사용할 종가 수
    pub volatility_window: usize,
    /// 80% 신뢰 구간 z값
    pub z80: f64,
    /// 95% 신뢰 구간 z값
    pub z95: f64,
    /// 추세 강도 배율 (기대 수익률 % × scale, ±100 제한)
    pub trend_strength_scale: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            trend_window: 20,
            volatility_window: 30,
            z80: 1.28,
            z95: 2.00,
            trend_strength_scale: 10.0,
        }
    }
}

impl ForecastParams {
    /// 예측에 필요한 최소 일봉 수.
    pub fn required_bars(&self) -> usize {
        self.trend_window.max(self.volatility_window)
    }

    /// 계산 전에 파라미터를 검증합니다.
    pub fn validate(&self) -> ForecastOutcome<()> {
        if self.trend_window < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "추세 윈도우는 2 이상이어야 합니다: {}",
                self.trend_window
            )));
        }
        if self.volatility_window < 3 {
            return Err(ForecastError::InvalidParameter(format!(
                "변동성 윈도우는 3 이상이어야 합니다: {}",
                self.volatility_window
            )));
        }
        let z_valid = |z: f64| z.is_finite() && z > 0.0;
        if !z_valid(self.z80) || !z_valid(self.z95) {
            return Err(ForecastError::InvalidParameter(
                "z값은 양수여야 합니다".to_string(),
            ));
        }
        if !self.trend_strength_scale.is_finite() || self.trend_strength_scale < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "추세 강도 배율 오류: {}",
                self.trend_strength_scale
            )));
        }
        Ok(())
    }
}

/// 최소제곱 추세선 (x = 0..n-1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// 적합에 사용한 점 개수
    pub len: usize,
}

impl TrendLine {
    /// 값 목록에 추세선을 적합합니다. 2개 미만이면 `None`.
    pub fn fit(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }

        let n_f = n as f64;
        let x_mean = (n_f - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n_f;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        let slope = numerator / denominator;
        Some(Self {
            slope,
            intercept: y_mean - slope * x_mean,
            len: n,
        })
    }

    /// x 위치의 추세 값.
    pub fn value_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// 마지막 점 기준 `days`일 뒤 추세 값 (0이면 마지막 점의 적합값).
    pub fn project(&self, days: u32) -> f64 {
        self.value_at((self.len - 1) as f64 + f64::from(days))
    }
}

/// 가격 예측기.
#[derive(Debug)]
pub struct PriceForecaster {
    engine: IndicatorEngine,
    params: ForecastParams,
}

impl PriceForecaster {
    /// 파라미터를 검증하고 예측기를 생성합니다.
    pub fn new(params: ForecastParams) -> ForecastOutcome<Self> {
        params.validate()?;
        Ok(Self {
            engine: IndicatorEngine::new(),
            params,
        })
    }

    /// 현재 파라미터.
    pub fn params(&self) -> &ForecastParams {
        &self.params
    }

    /// `horizon_days`일 뒤 가격을 예측합니다.
    ///
    /// 0일 예측은 허용되며 마지막 적합값과 폭 0인 구간을 반환합니다.
    /// 구간 하한은 0 아래로 내려갈 수 있습니다.
    pub fn forecast(&self, series: &PriceSeries, horizon_days: u32) -> ForecastOutcome<ForecastResult> {
        let required = self.params.required_bars();
        if series.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                provided: series.len(),
            });
        }

        let closes = series.closes();
        let current_price = series
            .last_close()
            .map(to_f64)
            .transpose()?
            .unwrap_or(0.0);
        if current_price <= 0.0 {
            return Err(ForecastError::Indicator(IndicatorError::DegenerateInput(
                "현재가가 0입니다".to_string(),
            )));
        }

        let trend_values = closes[closes.len() - self.params.trend_window..]
            .iter()
            .map(|c: &Decimal| to_f64(*c))
            .collect::<Result<Vec<f64>, _>>()?;
        let trend = TrendLine::fit(&trend_values).ok_or(ForecastError::InsufficientData {
            required: 2,
            provided: trend_values.len(),
        })?;
        let expected_target = trend.project(horizon_days);

        let volatility = self.engine.volatility(
            &closes,
            VolatilityParams {
                window: self.params.volatility_window,
            },
        )?;
        let forecast_vol = volatility.daily * f64::from(horizon_days).sqrt();

        let ci80 = ConfidenceInterval::around(
            expected_target,
            self.params.z80 * forecast_vol * current_price,
        );
        let ci95 = ConfidenceInterval::around(
            expected_target,
            self.params.z95 * forecast_vol * current_price,
        );

        let gain_pct = |target: f64| (target - current_price) / current_price * 100.0;
        let trend_strength =
            (gain_pct(expected_target) * self.params.trend_strength_scale).clamp(-100.0, 100.0);

        debug!(
            symbol = %series.symbol(),
            horizon_days,
            expected_target,
            daily_volatility = volatility.daily,
            slope = trend.slope,
            "Price forecast computed"
        );

        Ok(ForecastResult {
            symbol: series.symbol().clone(),
            current_price,
            expected_target,
            conservative_target: ci80.low,
            optimistic_target: ci80.high,
            ci80,
            ci95,
            daily_volatility: volatility.daily,
            annualized_volatility: volatility.annualized_pct,
            daily_trend: trend.slope,
            trend_strength,
            targets: PriceTargets {
                conservative_gain_pct: gain_pct(ci80.low),
                expected_gain_pct: gain_pct(expected_target),
                optimistic_gain_pct: gain_pct(ci80.high),
            },
            forecast_days: horizon_days,
        })
    }
}
