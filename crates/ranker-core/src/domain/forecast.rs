//! 가격 예측 결과 레코드.

use serde::{Deserialize, Serialize};

use crate::types::Symbol;

/// 신뢰 구간 (하한, 상한).
///
/// 하한은 0 아래로 내려갈 수 있으며 잘라내지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    /// 중심값 ± 반폭으로 구간을 생성합니다.
    pub fn around(center: f64, half_width: f64) -> Self {
        Self {
            low: center - half_width,
            high: center + half_width,
        }
    }

    /// 구간 폭.
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// 값이 구간 안(경계 포함)에 있는지 확인합니다.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// 현재가 대비 목표가 수익률 (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTargets {
    pub conservative_gain_pct: f64,
    pub expected_gain_pct: f64,
    pub optimistic_gain_pct: f64,
}

/// 종목별 가격 예측 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub symbol: Symbol,
    /// 마지막 종가
    pub current_price: f64,
    /// 추세선 연장 목표가
    pub expected_target: f64,
    /// 보수적 목표가 (80% 구간 하한)
    pub conservative_target: f64,
    /// 낙관적 목표가 (80% 구간 상한)
    pub optimistic_target: f64,
    pub ci80: ConfidenceInterval,
    pub ci95: ConfidenceInterval,
    /// 일간 수익률 표준편차 (비율)
    pub daily_volatility: f64,
    /// 연환산 변동성 (%)
    pub annualized_volatility: f64,
    /// 일간 추세 기울기 (가격/일)
    pub daily_trend: f64,
    /// 추세 강도 (-100 ~ 100)
    pub trend_strength: f64,
    pub targets: PriceTargets,
    pub forecast_days: u32,
}
