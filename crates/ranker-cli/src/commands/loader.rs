//! OHLCV CSV 로더.
//!
//! 파일 하나가 종목 하나이며 파일 이름(확장자 제외)이 심볼입니다.
//!
//! ```text
//! date,open,high,low,close,volume
//! 2024-01-02,100.5,101.2,99.8,100.9,1250000
//! ```
//!
//! 고가/저가/시가는 비워 둘 수 있습니다 (종가로 대체).

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use ranker_analytics::{FailureKind, SymbolFailure};
use ranker_core::{PriceBar, PriceSeries, Symbol};

/// CSV 한 행.
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    #[serde(default)]
    open: String,
    #[serde(default)]
    high: String,
    #[serde(default)]
    low: String,
    close: String,
    volume: String,
}

/// 디렉토리 로드 결과.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// 읽기에 성공한 시계열 (심볼 오름차순)
    pub series: Vec<PriceSeries>,
    /// 읽기에 실패한 파일
    pub failures: Vec<SymbolFailure>,
}

/// 파일 이름에서 심볼을 추출합니다.
pub fn symbol_from_path(path: &Path) -> Result<Symbol> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("파일 이름을 읽을 수 없습니다: {}", path.display()))?;
    Ok(Symbol::new(stem)?)
}

fn parse_decimal(value: &str, field: &str, line: usize) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .with_context(|| format!("{}행 {} 값 오류: {:?}", line, field, value))
}

/// 비어 있으면 0 (종가 대체 대상).
fn parse_optional_decimal(value: &str, field: &str, line: usize) -> Result<Decimal> {
    if value.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(value, field, line)
}

/// CSV 파일 하나를 가격 시계열로 읽습니다.
///
/// 날짜가 섞여 있으면 정렬하고, 중복 날짜는 에러입니다.
pub fn load_series_file(path: &Path) -> Result<PriceSeries> {
    let symbol = symbol_from_path(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("파일 열기 실패: {}", path.display()))?;

    let mut bars = Vec::new();
    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        // 헤더가 1행
        let line = i + 2;
        let row = row.with_context(|| format!("{}행 파싱 실패", line))?;

        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .with_context(|| format!("{}행 날짜 형식 오류: {:?}", line, row.date))?;
        let close = parse_decimal(&row.close, "close", line)?;
        let volume = parse_decimal(&row.volume, "volume", line)?;
        let open = parse_optional_decimal(&row.open, "open", line)?;
        let high = parse_optional_decimal(&row.high, "high", line)?;
        let low = parse_optional_decimal(&row.low, "low", line)?;

        bars.push(PriceBar::new(
            date,
            if open.is_zero() { close } else { open },
            high,
            low,
            close,
            volume,
        ));
    }

    let series = PriceSeries::from_unsorted(symbol, bars)
        .with_context(|| format!("시계열 검증 실패: {}", path.display()))?;

    debug!(symbol = %series.symbol(), bars = series.len(), "Series loaded");
    Ok(series)
}

/// 디렉토리의 `*.csv` 파일 목록 (이름순).
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("디렉토리 읽기 실패: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// 디렉토리의 모든 CSV를 읽습니다.
///
/// 파일 하나의 실패는 [`FailureKind::Load`]로 기록하고 나머지는 계속 읽습니다.
pub fn load_directory(dir: &Path) -> Result<LoadOutcome> {
    let files = csv_files(dir)?;
    let mut outcome = LoadOutcome::default();

    for path in &files {
        match load_series_file(path) {
            Ok(series) => outcome.series.push(series),
            Err(e) => {
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_uppercase();
                warn!(file = %path.display(), error = %format!("{:#}", e), "Failed to load series");
                outcome
                    .failures
                    .push(SymbolFailure::new(name, FailureKind::Load, format!("{:#}", e)));
            }
        }
    }

    info!(
        dir = %dir.display(),
        files = files.len(),
        loaded = outcome.series.len(),
        failed = outcome.failures.len(),
        "Data directory loaded"
    );

    Ok(outcome)
}
