//! 단일 종목 점수 명령어.
//!
//! ```bash
//! ranker score -f data/AAPL.csv
//! ranker score -f data/AAPL.csv --price 187.5
//! ```

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;

use ranker_analytics::CompositeScorer;
use ranker_core::CompositeResult;

use super::loader::load_series_file;
use crate::config::AppConfig;

/// 파일 하나를 읽어 종합 점수를 계산합니다.
///
/// `price`가 없으면 마지막 종가를 현재가로 사용합니다.
pub fn run_score(config: &AppConfig, file: &Path, price: Option<Decimal>) -> Result<CompositeResult> {
    let series = load_series_file(file)?;
    let current_price = price
        .or_else(|| series.last_close())
        .ok_or_else(|| anyhow!("빈 시계열: {}", file.display()))?;

    let scorer = CompositeScorer::new(config.scoring.clone()).context("잘못된 점수 설정")?;
    scorer
        .score(&series, current_price)
        .with_context(|| format!("{} 점수 계산 실패", series.symbol()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::fmt::Write as _;

    fn write_linear_csv(name: &str, bars: usize) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("ranker-score-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut body = String::from("date,open,high,low,close,volume\n");
        let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        for i in 0..bars {
            let date = start + chrono::Days::new(i as u64);
            writeln!(body, "{},,,,{},5000", date, 50 + i).unwrap();
        }
        let path = dir.join(format!("{}.csv", name));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_score_uses_last_close_by_default() {
        let path = write_linear_csv("lin", 40);

        let result = run_score(&AppConfig::default(), &path, None).unwrap();
        assert_eq!(result.symbol.as_str(), "LIN");
        assert_eq!(result.current_price, 89.0);
        assert_eq!(result.indicators.rsi, 100.0);

        let explicit = run_score(&AppConfig::default(), &path, Some(Decimal::from(10))).unwrap();
        assert_eq!(explicit.current_price, 10.0);
        assert_eq!(explicit.sub_scores.moving_average, 0.0);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_short_file_is_error() {
        let path = write_linear_csv("tiny", 5);
        let err = run_score(&AppConfig::default(), &path, None).unwrap_err();
        assert!(format!("{:#}", err).contains("데이터 부족"));
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
