//! 종합 점수 모듈.
//!
//! 기술적 지표를 0-100 점수로 종합하고 돌파 조건과 매매 셋업을 평가합니다.
//!
//! - [`CompositeScorer`]: 종목별 종합 점수 계산
//! - [`ScoringParams`]: 가중치, 구간 테이블, 임계값
//! - [`BreakoutThresholds`]: 돌파 조건 임계값 (v1 / v2 프리셋)
//! - [`derive_probability`]: 종합 점수 → 상승 확률

pub mod breakout;
pub mod breakpoints;
pub mod composite;
pub mod params;
pub mod setup;

use thiserror::Error;

use crate::indicators::IndicatorError;

pub use breakout::BreakoutThresholds;
pub use breakpoints::{Bucket, BreakpointTable, BreakpointTables};
pub use composite::{macd_score, moving_average_score, CompositeScorer};
pub use params::{FlatRangeParams, ScoreWeights, ScoringParams};
pub use setup::{analyze_setup, assess_confidence};

/// 점수 계산 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
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

impl From<IndicatorError> for ScoringError {
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

/// 점수 계산 결과 타입.
pub type ScoringResult<T> = Result<T, ScoringError>;

/// 종합 점수로부터 상승 확률(0-100)을 도출합니다.
///
/// 현재는 종합 점수를 그대로 사용하는 단순화 모델이며 보정된 확률이 아닙니다.
/// 별도 확률 모델로 교체할 때 이 함수만 바꾸면 됩니다.
pub fn derive_probability(composite_score: f64) -> f64 {
    composite_score.clamp(0.0, 100.0)
}
