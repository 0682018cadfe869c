//! 지지/저항선.
//!
//! 최근 N일 최저가/최고가로 지지선과 저항선을 구하고,
//! 그 구간 안에서 현재가의 상대 위치를 계산합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ranker_core::PriceBar;

use super::{IndicatorError, IndicatorResult};

/// 지지/저항 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelsParams {
    /// 조회 기간 (기본: 90). 데이터가 더 짧으면 있는 만큼 사용합니다.
    pub period: usize,
}

impl Default for LevelsParams {
    fn default() -> Self {
        Self { period: 90 }
    }
}

/// 지지/저항 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: Decimal,
    pub resistance: Decimal,
    /// 실제 사용한 일봉 수
    pub days: usize,
}

impl SupportResistance {
    /// 구간 내 상대 위치 (0-1).
    ///
    /// 저항선이 지지선 이하이면 0.5를 반환합니다.
    pub fn relative_position(&self, price: Decimal) -> Decimal {
        let range = self.resistance - self.support;
        if range <= Decimal::ZERO {
            return Decimal::new(5, 1);
        }
        ((price - self.support) / range)
            .max(Decimal::ZERO)
            .min(Decimal::ONE)
    }
}

/// 지지/저항 계산기.
#[derive(Debug, Default)]
pub struct LevelIndicators;

impl LevelIndicators {
    /// 새로운 지지/저항 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 최근 min(period, len)개 일봉의 최저가/최고가.
    ///
    /// 고가/저가가 없는 일봉은 종가를 사용합니다.
    pub fn support_resistance(
        &self,
        bars: &[PriceBar],
        params: LevelsParams,
    ) -> IndicatorResult<SupportResistance> {
        if params.period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if bars.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let days = params.period.min(bars.len());
        let recent = &bars[bars.len() - days..];

        let support = recent
            .iter()
            .map(PriceBar::effective_low)
            .min()
            .unwrap_or(Decimal::ZERO);
        let resistance = recent
            .iter()
            .map(PriceBar::effective_high)
            .max()
            .unwrap_or(Decimal::ZERO);

        Ok(SupportResistance {
            support,
            resistance,
            days,
        })
    }
}
