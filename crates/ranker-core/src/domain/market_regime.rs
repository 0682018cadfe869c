//! MarketRegime - 이동평균 기반 추세 분류.
//!
//! 매매 셋업 판단에 사용하는 3단계 레짐입니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 가격과 20일/50일 이동평균 배열로 판단한 추세 상태.
///
/// # 상태 설명
///
/// - **Uptrend**: 가격 > SMA50 이고 SMA20 > SMA50
/// - **Downtrend**: 가격 < SMA50 이고 SMA20 < SMA50
/// - **Range**: 그 외 (SMA50을 계산할 수 없는 경우 포함)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketRegime {
    /// 상승 추세
    Uptrend,
    /// 하락 추세
    Downtrend,
    /// 박스권 / 중립
    #[default]
    Range,
}

impl MarketRegime {
    /// 가격과 이동평균으로 레짐을 분류합니다.
    pub fn classify(price: f64, sma_20: f64, sma_50: Option<f64>) -> Self {
        let Some(sma_50) = sma_50 else {
            return Self::Range;
        };

        if price > sma_50 && sma_20 > sma_50 {
            Self::Uptrend
        } else if price < sma_50 && sma_20 < sma_50 {
            Self::Downtrend
        } else {
            Self::Range
        }
    }

    /// 설명 문자열
    pub fn description(self) -> &'static str {
        match self {
            Self::Uptrend => "상승 추세",
            Self::Downtrend => "하락 추세",
            Self::Range => "박스권/중립",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uptrend => "UPTREND",
            Self::Downtrend => "DOWNTREND",
            Self::Range => "RANGE",
        };
        write!(f, "{}", s)
    }
}
