//! 종목 분석 및 랭킹 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 기술적 지표 (RSI, MACD, 이동평균, 변동성, ATR, 지지/저항 등)
//! - 종합 점수 계산 및 돌파 조건 평가
//! - 추세선 기반 가격 예측과 신뢰 구간
//! - 결정적 랭킹 및 병렬 다종목 스캔
//!
//! 모든 계산은 메모리에 있는 단일 종목 시계열에 대한 순수 함수이며 I/O를 하지 않습니다.
//!
//! # Re-exports
//!
//! - [`indicators`]: 기술적 지표 (IndicatorEngine 등)
//! - [`scoring`]: 종합 점수 (CompositeScorer, ScoringParams 등)
//! - [`forecast`]: 가격 예측 (PriceForecaster, ForecastParams)
//! - [`ranking`]: 랭킹 (Ranker)
//! - [`pipeline`]: 다종목 스캔 (ScanPipeline, ScanReport)

pub mod forecast;
pub mod indicators;
pub mod pipeline;
pub mod ranking;
pub mod scoring;
pub mod snapshot;

// Indicators 모듈 re-exports
pub use indicators::{
    AtrParams,
    EmaParams,
    IndicatorEngine,
    IndicatorError,
    IndicatorResult,
    LevelsParams,
    MacdParams,
    MacdResult,
    MomentumParams,
    // 모멘텀 지표
    RsiParams,
    // 추세 지표
    SmaParams,
    SupportResistance,
    // 변동성 지표
    VolatilityParams,
    VolatilityResult,
    VolumeRatioParams,
};

// Scoring 모듈 re-exports
pub use scoring::{
    derive_probability, BreakoutThresholds, BreakpointTable, BreakpointTables, Bucket,
    CompositeScorer, FlatRangeParams, ScoreWeights, ScoringError, ScoringParams, ScoringResult,
};

// Forecast 모듈 re-exports
pub use forecast::{ForecastError, ForecastOutcome, ForecastParams, PriceForecaster, TrendLine};

// Ranking / Pipeline 모듈 re-exports
pub use pipeline::{
    EvaluationError, FailureKind, PipelineError, ScanPipeline, ScanReport, SymbolFailure,
};
pub use ranking::Ranker;
pub use snapshot::{compute_snapshot, IndicatorWindows};
