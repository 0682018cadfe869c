//! 다종목 스캔 파이프라인.
//!
//! 종목별 점수/예측 계산을 `spawn_blocking`으로 병렬 실행하고,
//! 동시 실행 수는 `buffer_unordered`로 제한합니다.
//! 한 종목의 실패는 보고서에 기록될 뿐 나머지 종목 계산을 멈추지 않습니다.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use ranker_core::{CompositeResult, ForecastResult, PriceSeries, RankedList, Symbol};

use crate::forecast::{ForecastError, ForecastParams, PriceForecaster};
use crate::ranking::Ranker;
use crate::scoring::{CompositeScorer, ScoringError, ScoringParams};

/// 종목 평가 오류.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("점수 계산 실패: {0}")]
    Scoring(#[from] ScoringError),

    #[error("가격 예측 실패: {0}")]
    Forecast(#[from] ForecastError),

    #[error("빈 시계열")]
    EmptySeries,

    #[error("작업 실행 실패: {0}")]
    Task(String),
}

impl EvaluationError {
    /// 실패 유형.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Scoring(ScoringError::InsufficientData { .. })
            | Self::Forecast(ForecastError::InsufficientData { .. })
            | Self::EmptySeries => FailureKind::InsufficientData,
            Self::Scoring(ScoringError::InvalidParameter(_))
            | Self::Forecast(ForecastError::InvalidParameter(_)) => FailureKind::InvalidParameter,
            Self::Scoring(ScoringError::Indicator(_)) | Self::Forecast(ForecastError::Indicator(_)) => {
                FailureKind::Calculation
            }
            Self::Task(_) => FailureKind::Task,
        }
    }
}

/// 파이프라인 생성 오류.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("점수 파라미터 오류: {0}")]
    Scoring(#[from] ScoringError),

    #[error("예측 파라미터 오류: {0}")]
    Forecast(#[from] ForecastError),
}

/// 실패 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 데이터 부족 (종목 건너뜀)
    InsufficientData,
    /// 잘못된 파라미터 또는 입력
    InvalidParameter,
    /// 0 가격 등 계산 불가능한 입력
    Calculation,
    /// 데이터 로드 실패
    Load,
    /// 작업 패닉/취소
    Task,
}

/// 종목별 실패 기록.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub kind: FailureKind,
    pub message: String,
}

impl SymbolFailure {
    pub fn new(symbol: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
            message: message.into(),
        }
    }
}

/// 스캔 보고서.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// 상위 N개 랭킹
    pub ranked: RankedList,
    /// 실패한 종목 (심볼 오름차순)
    pub failures: Vec<SymbolFailure>,
    /// 평가 시도한 종목 수
    pub evaluated: usize,
    /// 점수/예측 모두 성공한 종목 수
    pub succeeded: usize,
    /// 데이터 부족으로 건너뛴 종목 수
    pub insufficient_data: usize,
    /// 그 밖의 실패 수
    pub other_failures: usize,
    /// 소요 시간 (ms)
    pub elapsed_ms: u64,
}

impl ScanReport {
    /// 데이터 로드 단계 실패를 보고서에 합칩니다.
    pub fn with_load_failures(mut self, failures: Vec<SymbolFailure>) -> Self {
        self.evaluated += failures.len();
        for failure in failures {
            self.push_failure(failure);
        }
        self.failures.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        self
    }

    fn push_failure(&mut self, failure: SymbolFailure) {
        if failure.kind == FailureKind::InsufficientData {
            self.insufficient_data += 1;
        } else {
            self.other_failures += 1;
        }
        self.failures.push(failure);
    }

    /// 실패 수 합계.
    pub fn failed(&self) -> usize {
        self.insufficient_data + self.other_failures
    }
}

/// 종목별 평가 결과.
type Evaluation = Result<(CompositeResult, ForecastResult), (Symbol, EvaluationError)>;

/// 다종목 스캔 파이프라인.
#[derive(Debug, Clone)]
pub struct ScanPipeline {
    scorer: Arc<CompositeScorer>,
    forecaster: Arc<PriceForecaster>,
    horizon_days: u32,
    parallelism: usize,
}

impl ScanPipeline {
    /// 파라미터를 검증하고 파이프라인을 생성합니다.
    pub fn new(
        scoring: ScoringParams,
        forecast: ForecastParams,
        horizon_days: u32,
        parallelism: usize,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            scorer: Arc::new(CompositeScorer::new(scoring)?),
            forecaster: Arc::new(PriceForecaster::new(forecast)?),
            horizon_days,
            parallelism: parallelism.max(1),
        })
    }

    /// 예측 기간 (일).
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// 한 종목을 평가합니다. 현재가는 마지막 종가입니다.
    pub fn evaluate(
        &self,
        series: &PriceSeries,
    ) -> Result<(CompositeResult, ForecastResult), EvaluationError> {
        evaluate_one(&self.scorer, &self.forecaster, series, self.horizon_days)
    }

    /// 모든 종목을 평가하고 상위 `top_n`개 랭킹을 만듭니다.
    pub async fn run(&self, series_list: Vec<PriceSeries>, top_n: usize) -> ScanReport {
        self.run_with_progress(series_list, top_n, |_, _| {}).await
    }

    /// 종목 하나가 끝날 때마다 `on_done(심볼, 성공 여부)`를 호출합니다.
    pub async fn run_with_progress<F>(
        &self,
        series_list: Vec<PriceSeries>,
        top_n: usize,
        mut on_done: F,
    ) -> ScanReport
    where
        F: FnMut(&Symbol, bool),
    {
        let start = Instant::now();
        let total = series_list.len();

        info!(
            symbols = total,
            parallelism = self.parallelism,
            horizon_days = self.horizon_days,
            "Scan started"
        );

        let tasks = series_list.into_iter().map(|series| {
            let scorer = Arc::clone(&self.scorer);
            let forecaster = Arc::clone(&self.forecaster);
            let horizon_days = self.horizon_days;

            async move {
                let symbol = series.symbol().clone();
                let joined = tokio::task::spawn_blocking(move || {
                    evaluate_one(&scorer, &forecaster, &series, horizon_days)
                })
                .await;

                match joined {
                    Ok(Ok(pair)) => Ok(pair),
                    Ok(Err(e)) => Err((symbol, e)),
                    Err(e) => Err((symbol, EvaluationError::Task(e.to_string()))),
                }
            }
        });

        let outcomes: Vec<Evaluation> = stream::iter(tasks)
            .buffer_unordered(self.parallelism)
            .inspect(|outcome| match outcome {
                Ok((score, _)) => on_done(&score.symbol, true),
                Err((symbol, _)) => on_done(symbol, false),
            })
            .collect()
            .await;

        let mut report = ScanReport {
            evaluated: total,
            ..ScanReport::default()
        };
        let mut successes = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            match outcome {
                Ok(pair) => successes.push(pair),
                Err((symbol, error)) => {
                    warn!(symbol = %symbol, error = %error, "Symbol evaluation failed");
                    report.push_failure(SymbolFailure::new(
                        symbol.as_str(),
                        error.kind(),
                        error.to_string(),
                    ));
                }
            }
        }

        report.failures.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        report.succeeded = successes.len();
        report.ranked = Ranker::rank(successes, top_n);
        report.elapsed_ms = start.elapsed().as_millis() as u64;

        info!(
            evaluated = report.evaluated,
            succeeded = report.succeeded,
            insufficient_data = report.insufficient_data,
            other_failures = report.other_failures,
            elapsed_ms = report.elapsed_ms,
            "Scan completed"
        );

        report
    }
}

fn evaluate_one(
    scorer: &CompositeScorer,
    forecaster: &PriceForecaster,
    series: &PriceSeries,
    horizon_days: u32,
) -> Result<(CompositeResult, ForecastResult), EvaluationError> {
    let _span = ranker_core::symbol_span!("evaluate", series.symbol(), series.len()).entered();
    let current_price = series.last_close().ok_or(EvaluationError::EmptySeries)?;
    let score = scorer.score(series, current_price)?;
    let forecast = forecaster.forecast(series, horizon_days)?;
    Ok((score, forecast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ranker_core::PriceBar;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn series(symbol: &str, len: usize, step: Decimal) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..len)
            .map(|i| {
                let close = dec!(100) + step * Decimal::from(i as u64);
                let date = start + chrono::Days::new(i as u64);
                PriceBar::from_close(date, close, dec!(1000))
            })
            .collect();
        PriceSeries::new(Symbol::new(symbol).unwrap(), bars).unwrap()
    }

    fn pipeline() -> ScanPipeline {
        ScanPipeline::new(ScoringParams::default(), ForecastParams::default(), 14, 2).unwrap()
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let input = vec![
            series("UP", 60, dec!(0.5)),
            series("SHORT", 10, dec!(0.5)),
            series("DOWN", 60, dec!(-0.5)),
        ];

        let mut seen = 0;
        let report = pipeline()
            .run_with_progress(input, 5, |_, _| seen += 1)
            .await;

        assert_eq!(seen, 3);
        assert_eq!(report.evaluated, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.insufficient_data, 1);
        assert_eq!(report.other_failures, 0);
        assert_eq!(report.failures[0].symbol, "SHORT");
        assert_eq!(report.ranked.len(), 2);
    }

    #[tokio::test]
    async fn test_forecast_insufficiency_is_reported() {
        // 점수는 20봉으로 가능하지만 예측은 30봉 필요
        let report = pipeline().run(vec![series("MID", 25, dec!(0.1))], 5).await;

        assert_eq!(report.succeeded, 0);
        assert_eq!(report.insufficient_data, 1);
        assert!(report.ranked.is_empty());
    }

    #[tokio::test]
    async fn test_result_is_independent_of_parallelism() {
        let make_input = || {
            (0..8)
                .map(|i| series(&format!("S{}", i), 60, Decimal::from(i - 4) * dec!(0.1)))
                .collect::<Vec<_>>()
        };

        let serial = ScanPipeline::new(ScoringParams::default(), ForecastParams::default(), 14, 1)
            .unwrap()
            .run(make_input(), 5)
            .await;
        let parallel = ScanPipeline::new(ScoringParams::default(), ForecastParams::default(), 14, 8)
            .unwrap()
            .run(make_input(), 5)
            .await;

        assert_eq!(serial.ranked, parallel.ranked);
    }

    #[test]
    fn test_load_failures_are_counted() {
        let report = ScanReport::default().with_load_failures(vec![SymbolFailure::new(
            "BAD",
            FailureKind::Load,
            "parse error",
        )]);

        assert_eq!(report.evaluated, 1);
        assert_eq!(report.other_failures, 1);
        assert_eq!(report.failed(), 1);
    }
}
