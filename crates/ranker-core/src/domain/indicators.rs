//! 지표 스냅샷.
//!
//! 시계열의 마지막 일봉 기준으로 계산된 기술적 지표 묶음입니다.
//! 점수 계산과 보고서 출력에 사용하므로 모든 값은 `f64`입니다.

use serde::{Deserialize, Serialize};

/// MACD 세 값 (라인, 시그널, 히스토그램).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdSnapshot {
    /// MACD 라인 (EMA12 - EMA26)
    pub line: f64,
    /// 시그널 라인 (MACD 라인의 EMA9)
    pub signal: f64,
    /// 히스토그램 (라인 - 시그널)
    pub histogram: f64,
}

impl MacdSnapshot {
    /// 라인이 시그널 위에 있는지 여부.
    pub fn is_line_above_signal(&self) -> bool {
        self.line > self.signal
    }
}

/// 마지막 일봉 기준 지표 스냅샷.
///
/// 기간이 보유 데이터보다 긴 지표(SMA50, EMA26, MACD)는 `None`입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// RSI (0-100)
    pub rsi: f64,
    /// MACD (시그널 계산 가능할 때만)
    pub macd: Option<MacdSnapshot>,
    /// 20일 단순 이동평균
    pub sma_20: f64,
    /// 50일 단순 이동평균
    pub sma_50: Option<f64>,
    /// 12일 지수 이동평균
    pub ema_12: f64,
    /// 26일 지수 이동평균
    pub ema_26: Option<f64>,
    /// 거래량 비율 (최근 / 20일 평균)
    pub volume_ratio: f64,
    /// 10일 모멘텀 (%)
    pub momentum_10d: f64,
    /// 연환산 변동성 (%)
    pub volatility: f64,
    /// 20일 가격 범위 (%)
    pub price_range_20d: f64,
    /// 지지선 (90일 최저가)
    pub support: f64,
    /// 저항선 (90일 최고가)
    pub resistance: f64,
    /// 지지/저항 구간 내 상대 위치 (0-1)
    pub relative_position: f64,
    /// 지지/저항 계산에 실제 사용한 일수
    pub levels_days: usize,
    /// 14일 ATR
    pub atr_14: f64,
}

impl IndicatorSnapshot {
    /// 이용 가능한 이동평균 목록 (SMA20, SMA50, EMA12, EMA26 순).
    pub fn available_moving_averages(&self) -> Vec<f64> {
        [
            Some(self.sma_20),
            self.sma_50,
            Some(self.ema_12),
            self.ema_26,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
