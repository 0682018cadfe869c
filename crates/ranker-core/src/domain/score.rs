//! 종합 점수 결과 레코드.
//!
//! - `SubScores` - 지표별 0-100 점수
//! - `BreakoutFlags` - 돌파 조건 4종 + AND 신호
//! - `TradeSetup` - 매매 전략 분류와 진입/손절/목표가
//! - `ConfidenceLevel` - 정성적 신뢰도
//! - `CompositeResult` - 위 항목을 묶은 종목별 결과

use serde::{Deserialize, Serialize};
use std::fmt;

use super::indicators::IndicatorSnapshot;
use crate::types::Symbol;

/// 지표별 점수 (각 0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub rsi: f64,
    pub macd: f64,
    pub moving_average: f64,
    pub volume: f64,
    pub momentum: f64,
}

impl SubScores {
    /// 모든 점수를 순서대로 반환합니다 (RSI, MACD, MA, Volume, Momentum).
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.rsi,
            self.macd,
            self.moving_average,
            self.volume,
            self.momentum,
        ]
    }
}

/// 돌파 조건 플래그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreakoutFlags {
    /// 거래량 급증 (비율 >= 1.5)
    pub volume_spike: bool,
    /// RSI 모멘텀 구간 (50-70)
    pub rsi_momentum: bool,
    /// MACD 상승 (히스토그램 > 0 또는 라인 > 시그널)
    pub macd_momentum: bool,
    /// 지지/저항 구간 내 유리한 위치
    pub favorable_position: bool,
    /// 네 조건 모두 충족
    pub breakout_signal: bool,
}

impl BreakoutFlags {
    /// 네 조건으로 플래그를 만들고 AND 신호를 계산합니다.
    pub fn new(
        volume_spike: bool,
        rsi_momentum: bool,
        macd_momentum: bool,
        favorable_position: bool,
    ) -> Self {
        Self {
            volume_spike,
            rsi_momentum,
            macd_momentum,
            favorable_position,
            breakout_signal: volume_spike && rsi_momentum && macd_momentum && favorable_position,
        }
    }

    /// 충족된 조건 수 (0-4).
    pub fn met_count(&self) -> usize {
        [
            self.volume_spike,
            self.rsi_momentum,
            self.macd_momentum,
            self.favorable_position,
        ]
        .iter()
        .filter(|f| **f)
        .count()
    }
}

/// 매매 전략 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// 상승 추세 중 눌림목 매수
    Pullback,
    /// 저항선 돌파 매수
    Breakout,
    /// 박스권 하단 반등 매수
    RangeReversal,
    /// 명확한 셋업 없음
    #[default]
    NoSetup,
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pullback => "pullback",
            Self::Breakout => "breakout",
            Self::RangeReversal => "range_reversal",
            Self::NoSetup => "no_setup",
        };
        write!(f, "{}", s)
    }
}

/// 매매 셋업 (진입/손절/목표가와 손익비).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeSetup {
    pub strategy: StrategyType,
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    /// 손익비 (목표 수익 / 손절 위험), 계산 불가 시 0
    pub rr_ratio: f64,
}

impl TradeSetup {
    /// 셋업을 만들고 손익비를 계산합니다.
    pub fn new(strategy: StrategyType, entry: f64, stop_loss: f64, target: f64) -> Self {
        let risk = entry - stop_loss;
        let reward = target - entry;
        let rr_ratio = if stop_loss > 0.0 && risk > 0.0 && reward > 0.0 {
            reward / risk
        } else {
            0.0
        };

        Self {
            strategy,
            entry,
            stop_loss,
            target,
            rr_ratio,
        }
    }
}

/// 정성적 신뢰도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// 0-100 신뢰도 점수를 등급으로 변환합니다 (65 이상 High, 40 이상 Medium).
    pub fn from_points(points: f64) -> Self {
        if points >= 65.0 {
            Self::High
        } else if points >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// 종목별 종합 점수 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub symbol: Symbol,
    /// 점수 계산 기준 가격
    pub current_price: f64,
    /// 보너스 적용 후 종합 점수 (0-100)
    pub composite_score: f64,
    /// 상승 확률 (현재는 종합 점수와 동일한 값)
    pub probability: f64,
    /// 보너스 적용 전 가중 합계
    pub base_score: f64,
    /// 박스권 보너스 (미적용 시 0)
    pub flat_range_bonus: f64,
    pub sub_scores: SubScores,
    pub indicators: IndicatorSnapshot,
    pub breakout_filters: BreakoutFlags,
    pub setup: TradeSetup,
    pub confidence: ConfidenceLevel,
}
