//! 점수 계산 파라미터.
//!
//! 가중치, 구간 테이블, 지표 기간, 보너스/돌파 임계값을 하나의 불변 객체로 묶습니다.
//! 설정 파일에서 일부 필드만 덮어쓸 수 있도록 모든 구조체는 `serde(default)`입니다.

use serde::{Deserialize, Serialize};

use super::breakout::BreakoutThresholds;
use super::breakpoints::BreakpointTables;
use super::{ScoringError, ScoringResult};
use crate::snapshot::IndicatorWindows;

/// 지표별 가중치.
///
/// 합계로 정규화하여 사용하므로 합이 1일 필요는 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub rsi: f64,
    pub macd: f64,
    pub moving_average: f64,
    pub volume: f64,
    pub momentum: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rsi: 0.25,
            macd: 0.25,
            moving_average: 0.20,
            volume: 0.15,
            momentum: 0.15,
        }
    }
}

impl ScoreWeights {
    fn as_array(&self) -> [f64; 5] {
        [
            self.rsi,
            self.macd,
            self.moving_average,
            self.volume,
            self.momentum,
        ]
    }

    /// 가중치 합계.
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// 합계 1로 정규화한 가중치 (RSI, MACD, MA, Volume, Momentum 순).
    pub fn normalized(&self) -> [f64; 5] {
        let total = self.total();
        self.as_array().map(|w| w / total)
    }

    /// 음수/비유한 가중치가 없고 합계가 양수인지 검증합니다.
    pub fn validate(&self) -> ScoringResult<()> {
        if self.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScoringError::InvalidParameter(
                "가중치는 0 이상의 유한한 값이어야 합니다".to_string(),
            ));
        }
        if self.total() <= 0.0 {
            return Err(ScoringError::InvalidParameter(
                "가중치 합계는 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// 박스권 보너스 파라미터.
///
/// 변동성 < max_volatility, 가격 범위 < max_price_range, RSI < max_rsi 일 때
/// `min(max_bonus, max(0, max_price_range - range) × tightness_factor)`를 더합니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatRangeParams {
    /// 연환산 변동성 상한 (%)
    pub max_volatility: f64,
    /// 20일 가격 범위 상한 (%)
    pub max_price_range: f64,
    /// RSI 상한
    pub max_rsi: f64,
    pub tightness_factor: f64,
    pub max_bonus: f64,
}

impl Default for FlatRangeParams {
    fn default() -> Self {
        Self {
            max_volatility: 30.0,
            max_price_range: 15.0,
            max_rsi: 50.0,
            tightness_factor: 0.67,
            max_bonus: 10.0,
        }
    }
}

impl FlatRangeParams {
    /// 조건 충족 시 보너스, 아니면 0.
    pub fn bonus(&self, volatility: f64, price_range: f64, rsi: f64) -> f64 {
        let qualifies =
            volatility < self.max_volatility && price_range < self.max_price_range && rsi < self.max_rsi;
        if !qualifies {
            return 0.0;
        }
        let tightness = (self.max_price_range - price_range).max(0.0);
        (tightness * self.tightness_factor).min(self.max_bonus)
    }
}

/// 종합 점수 계산 파라미터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// 최소 일봉 수 (미만이면 `InsufficientData`)
    pub min_bars: usize,
    pub windows: IndicatorWindows,
    pub weights: ScoreWeights,
    pub tables: BreakpointTables,
    /// MACD 강세 점수의 히스토그램 배율
    pub macd_hist_scale: f64,
    pub flat_range: FlatRangeParams,
    pub breakout: BreakoutThresholds,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            min_bars: 20,
            windows: IndicatorWindows::default(),
            weights: ScoreWeights::default(),
            tables: BreakpointTables::default(),
            macd_hist_scale: 10.0,
            flat_range: FlatRangeParams::default(),
            breakout: BreakoutThresholds::default(),
        }
    }
}

impl ScoringParams {
    /// 계산 전에 모든 파라미터를 검증합니다.
    pub fn validate(&self) -> ScoringResult<()> {
        if self.min_bars == 0 {
            return Err(ScoringError::InvalidParameter(
                "min_bars는 0보다 커야 합니다".to_string(),
            ));
        }
        self.weights.validate()?;
        self.tables
            .validate()
            .map_err(ScoringError::InvalidParameter)?;
        if !self.macd_hist_scale.is_finite() || self.macd_hist_scale < 0.0 {
            return Err(ScoringError::InvalidParameter(format!(
                "macd_hist_scale 오류: {}",
                self.macd_hist_scale
            )));
        }
        self.breakout
            .validate()
            .map_err(ScoringError::InvalidParameter)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-12);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_weights_are_normalized() {
        let weights = ScoreWeights {
            rsi: 2.0,
            macd: 2.0,
            moving_average: 0.0,
            volume: 0.0,
            momentum: 0.0,
        };
        assert_eq!(weights.normalized(), [0.5, 0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_invalid_weights() {
        let zero = ScoreWeights {
            rsi: 0.0,
            macd: 0.0,
            moving_average: 0.0,
            volume: 0.0,
            momentum: 0.0,
        };
        assert!(matches!(zero.validate(), Err(ScoringError::InvalidParameter(_))));

        let negative = ScoreWeights {
            rsi: -0.1,
            ..ScoreWeights::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_flat_range_bonus() {
        let params = FlatRangeParams::default();
        // (15 - 3) * 0.67 = 8.04
        assert!((params.bonus(20.0, 3.0, 45.0) - 8.04).abs() < 1e-9);
        // 상한 10
        assert_eq!(params.bonus(20.0, 0.0, 45.0), 10.0);
        // RSI 50 이상이면 미적용
        assert_eq!(params.bonus(20.0, 3.0, 50.0), 0.0);
        assert_eq!(params.bonus(30.0, 3.0, 45.0), 0.0);
        assert_eq!(params.bonus(20.0, 15.0, 45.0), 0.0);
    }

    #[test]
    fn test_partial_override_from_json() {
        let params: ScoringParams =
            serde_json::from_str(r#"{ "min_bars": 40, "weights": { "rsi": 0.5 } }"#).unwrap();
        assert_eq!(params.min_bars, 40);
        assert_eq!(params.weights.rsi, 0.5);
        assert_eq!(params.weights.macd, 0.25);
        assert_eq!(params.windows.levels, 90);
    }
}
