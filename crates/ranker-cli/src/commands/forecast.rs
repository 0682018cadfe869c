//! 단일 종목 가격 예측 명령어.
//!
//! ```bash
//! ranker forecast -f data/AAPL.csv --horizon 20
//! ```

use std::path::Path;

use anyhow::{Context, Result};

use ranker_analytics::PriceForecaster;
use ranker_core::ForecastResult;

use super::loader::load_series_file;
use crate::config::AppConfig;

/// 파일 하나를 읽어 `horizon_days`일 뒤 가격을 예측합니다.
pub fn run_forecast(config: &AppConfig, file: &Path, horizon_days: u32) -> Result<ForecastResult> {
    let series = load_series_file(file)?;
    let forecaster = PriceForecaster::new(config.forecast).context("잘못된 예측 설정")?;
    forecaster
        .forecast(&series, horizon_days)
        .with_context(|| format!("{} 가격 예측 실패", series.symbol()))
}
