//! 거래량 지표.
//!
//! 최근 거래량을 N일 평균과 비교하는 거래량 비율을 제공합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// 거래량 비율 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeRatioParams {
    /// 평균 기간 (기본: 20, 최근 거래량 포함).
    pub period: usize,
}

impl Default for VolumeRatioParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// 거래량 지표 계산기.
#[derive(Debug, Default)]
pub struct VolumeIndicators;

impl VolumeIndicators {
    /// 새로운 거래량 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 거래량 비율 = 최근 거래량 / 최근 period개 평균 거래량.
    ///
    /// 평균에는 최근 거래량 자신도 포함됩니다.
    /// 평균 거래량이 0이면 비율은 0입니다.
    pub fn volume_ratio(
        &self,
        volumes: &[Decimal],
        params: VolumeRatioParams,
    ) -> IndicatorResult<Decimal> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if volumes.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: volumes.len(),
            });
        }

        let recent = &volumes[volumes.len() - period..];
        let average = recent.iter().sum::<Decimal>() / Decimal::from(period);

        if average == Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let latest = volumes[volumes.len() - 1];
        Ok(latest / average)
    }
}
