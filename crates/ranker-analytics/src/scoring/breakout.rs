//! 돌파 조건 필터.
//!
//! 거래량 급증, RSI 모멘텀, MACD 상승, 유리한 위치 네 조건을 독립적으로 평가합니다.
//! 위치 상한은 버전마다 달라졌기 때문에 명시적인 프리셋으로 관리합니다.

use serde::{Deserialize, Serialize};

use ranker_core::{BreakoutFlags, IndicatorSnapshot};

/// 돌파 조건 임계값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutThresholds {
    /// 거래량 급증 기준 비율 (이상)
    pub volume_spike_ratio: f64,
    /// RSI 모멘텀 구간 하한 (포함)
    pub rsi_low: f64,
    /// RSI 모멘텀 구간 상한 (포함)
    pub rsi_high: f64,
    /// 유리한 위치 하한 (포함)
    pub position_low: f64,
    /// 유리한 위치 상한 (포함)
    pub position_high: f64,
}

impl BreakoutThresholds {
    /// 초기 버전: 위치 구간 40-70%.
    pub fn v1() -> Self {
        Self {
            volume_spike_ratio: 1.5,
            rsi_low: 50.0,
            rsi_high: 70.0,
            position_low: 0.40,
            position_high: 0.70,
        }
    }

    /// 개정 버전: 위치 구간 40-75%.
    pub fn v2() -> Self {
        Self {
            position_high: 0.75,
            ..Self::v1()
        }
    }

    /// 구간 하한이 상한보다 크지 않은지 검증합니다.
    pub fn validate(&self) -> Result<(), String> {
        if self.rsi_low > self.rsi_high {
            return Err(format!(
                "RSI 구간 오류: {} > {}",
                self.rsi_low, self.rsi_high
            ));
        }
        if self.position_low > self.position_high {
            return Err(format!(
                "위치 구간 오류: {} > {}",
                self.position_low, self.position_high
            ));
        }
        Ok(())
    }

    /// 스냅샷으로 돌파 조건을 평가합니다.
    ///
    /// MACD가 없으면 `macd_momentum`은 false입니다.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot) -> BreakoutFlags {
        let volume_spike = snapshot.volume_ratio >= self.volume_spike_ratio;
        let rsi_momentum = snapshot.rsi >= self.rsi_low && snapshot.rsi <= self.rsi_high;
        let macd_momentum = snapshot
            .macd
            .map(|m| m.histogram > 0.0 || m.is_line_above_signal())
            .unwrap_or(false);
        let favorable_position = snapshot.relative_position >= self.position_low
            && snapshot.relative_position <= self.position_high;

        BreakoutFlags::new(volume_spike, rsi_momentum, macd_momentum, favorable_position)
    }
}

impl Default for BreakoutThresholds {
    fn default() -> Self {
        Self::v2()
    }
}
