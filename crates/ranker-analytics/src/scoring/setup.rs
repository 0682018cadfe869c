//! 매매 셋업 분류와 신뢰도 평가.
//!
//! 레짐, RSI, 지지/저항, ATR로 전략 유형을 고르고 진입/손절/목표가를 제시합니다.
//! 결과는 참고 정보이며 종합 점수에는 영향을 주지 않습니다.

use ranker_core::{ConfidenceLevel, IndicatorSnapshot, MarketRegime, StrategyType, TradeSetup};

/// 눌림목 진입가 = SMA20 × (1 + 2%)
const PULLBACK_ENTRY_PCT: f64 = 0.02;
/// ATR이 없을 때 손절 비율
const FALLBACK_STOP_PCT: f64 = 0.05;
/// ATR이 없을 때 목표 비율
const FALLBACK_TARGET_PCT: f64 = 0.10;

/// 스냅샷과 현재가로 매매 셋업을 분류합니다.
///
/// 우선순위: 눌림목 → 돌파 → 박스권 반등 → 셋업 없음.
pub fn analyze_setup(snapshot: &IndicatorSnapshot, price: f64, regime: MarketRegime) -> TradeSetup {
    let atr = snapshot.atr_14;
    let support = snapshot.support;
    let resistance = snapshot.resistance;
    let fallback_stop = price * (1.0 - FALLBACK_STOP_PCT);

    if regime == MarketRegime::Uptrend
        && (35.0..=60.0).contains(&snapshot.rsi)
        && snapshot.sma_20 > 0.0
    {
        let entry = snapshot.sma_20 * (1.0 + PULLBACK_ENTRY_PCT);
        let stop = if support > 0.0 && atr > 0.0 {
            support - atr * 0.5
        } else {
            fallback_stop
        };
        let target = if resistance > entry {
            resistance
        } else {
            entry + (entry - stop) * 2.0
        };
        return TradeSetup::new(StrategyType::Pullback, entry, stop, target);
    }

    if resistance > 0.0 && price > resistance * 0.99 && snapshot.volume_ratio > 1.2 {
        let stop = if atr > 0.0 {
            resistance - atr * 0.5
        } else {
            fallback_stop
        };
        let target = if support > 0.0 {
            resistance + (resistance - support)
        } else {
            price * (1.0 + FALLBACK_TARGET_PCT)
        };
        return TradeSetup::new(StrategyType::Breakout, price, stop, target);
    }

    if regime == MarketRegime::Range
        && support > 0.0
        && price > 0.0
        && (price - support) / price < 0.05
    {
        let stop = if atr > 0.0 {
            support - atr * 0.5
        } else {
            fallback_stop
        };
        let target = if resistance > price {
            resistance
        } else {
            price * (1.0 + FALLBACK_TARGET_PCT)
        };
        return TradeSetup::new(StrategyType::RangeReversal, price, stop, target);
    }

    let (stop, target) = if atr > 0.0 {
        (price - atr * 1.5, price + atr * 2.0)
    } else {
        (fallback_stop, price * (1.0 + FALLBACK_TARGET_PCT))
    };
    TradeSetup::new(StrategyType::NoSetup, price, stop, target)
}

/// 추세 정렬, 거래량 확인, 변동성 안정성, 손익비 품질로 신뢰도를 평가합니다.
///
/// 각 항목 0-25점, 변동성 40% 초과 시 -15점.
pub fn assess_confidence(
    trend_score: f64,
    volume_ratio: f64,
    volatility: f64,
    rr_ratio: f64,
) -> ConfidenceLevel {
    let trend = (trend_score * 0.25).min(25.0);

    let volume = if volume_ratio > 1.5 {
        25.0
    } else if volume_ratio > 1.2 {
        18.0
    } else if volume_ratio > 1.0 {
        10.0
    } else {
        0.0
    };

    let stability = if volatility < 20.0 {
        25.0
    } else if volatility < 30.0 {
        18.0
    } else if volatility < 40.0 {
        10.0
    } else {
        0.0
    };

    let rr = if rr_ratio >= 2.0 {
        25.0
    } else if rr_ratio >= 1.5 {
        18.0
    } else if rr_ratio >= 1.2 {
        10.0
    } else {
        0.0
    };

    let mut points = trend + volume + stability + rr;
    if volatility > 40.0 {
        points -= 15.0;
    }

    ConfidenceLevel::from_points(points)
}
