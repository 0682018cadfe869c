//! 랭킹 명령어.
//!
//! 데이터 디렉토리의 모든 종목을 평가하고 상위 N개를 출력합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # data/ 디렉토리 상위 5개
//! ranker rank -d data
//!
//! # 상위 10개, 20일 예측, JSON 출력
//! ranker rank -d data -n 10 --horizon 20 --format json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use ranker_analytics::{ScanPipeline, ScanReport};

use super::loader::load_directory;
use super::{truncate, OutputFormat};
use crate::config::AppConfig;

/// 랭킹 명령 옵션 (지정하지 않은 값은 설정 파일 사용).
#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    pub data_dir: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub horizon_days: Option<u32>,
    pub format: OutputFormat,
    /// 진행 표시줄 표시 여부
    pub progress: bool,
}

/// 데이터를 읽고 스캔을 실행합니다.
pub async fn run_rank(config: &AppConfig, options: &RankOptions) -> Result<ScanReport> {
    let data_dir = options
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.scan.data_dir));
    let top_n = options.top_n.unwrap_or(config.scan.top_n);
    let horizon_days = options.horizon_days.unwrap_or(config.scan.horizon_days);

    let pipeline = ScanPipeline::new(
        config.scoring.clone(),
        config.forecast,
        horizon_days,
        config.scan.effective_parallelism(),
    )
    .context("잘못된 점수/예측 설정")?;

    let loaded = load_directory(&data_dir)?;
    info!(
        symbols = loaded.series.len(),
        top_n,
        horizon_days,
        "Ranking started"
    );

    let report = if options.progress {
        let pb = ProgressBar::new(loaded.series.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("=>-"),
        );
        let report = pipeline
            .run_with_progress(loaded.series, top_n, |symbol, _| {
                pb.set_message(symbol.to_string());
                pb.inc(1);
            })
            .await;
        pb.finish_and_clear();
        report
    } else {
        pipeline.run(loaded.series, top_n).await
    };

    Ok(report.with_load_failures(loaded.failures))
}

/// 보고서를 출력 형식에 맞게 문자열로 만듭니다.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("JSON 직렬화 실패")
        }
    }
}

/// 테이블 형식 출력.
fn format_table(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<4} {:<10} {:>10} {:>6} {:>6} {:>6} {:>6} {:>9} {:<15} {:<6} {:>10} {:>23} {:>7}\n",
        "RANK",
        "SYMBOL",
        "PRICE",
        "SCORE",
        "BONUS",
        "RSI",
        "VOL_R",
        "BREAKOUT",
        "SETUP",
        "CONF",
        "TARGET",
        "CI80",
        "GAIN%"
    ));
    output.push_str(&"-".repeat(130));
    output.push('\n');

    for entry in report.ranked.iter() {
        let score = &entry.score;
        let forecast = &entry.forecast;
        output.push_str(&format!(
            "{:<4} {:<10} {:>10.2} {:>6.1} {:>6.1} {:>6.1} {:>6.2} {:>9} {:<15} {:<6} {:>10.2} {:>23} {:>+7.2}\n",
            entry.rank,
            truncate(score.symbol.as_str(), 10),
            score.current_price,
            score.composite_score,
            score.flat_range_bonus,
            score.indicators.rsi,
            score.indicators.volume_ratio,
            format!("{}/4", score.breakout_filters.met_count()),
            score.setup.strategy.to_string(),
            score.confidence.to_string(),
            forecast.expected_target,
            format!("{:.2} ~ {:.2}", forecast.ci80.low, forecast.ci80.high),
            forecast.targets.expected_gain_pct,
        ));
    }

    if report.ranked.is_empty() {
        output.push_str("(랭킹 결과 없음)\n");
    }

    output.push('\n');
    output.push_str(&format!(
        "평가: {}  성공: {}  데이터 부족: {}  기타 실패: {}  ({} ms)\n",
        report.evaluated,
        report.succeeded,
        report.insufficient_data,
        report.other_failures,
        report.elapsed_ms
    ));

    if !report.failures.is_empty() {
        output.push_str("\n실패 종목:\n");
        for failure in &report.failures {
            output.push_str(&format!(
                "  {:<10} {:<18} {}\n",
                truncate(&failure.symbol, 10),
                format!("{:?}", failure.kind),
                failure.message
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::fmt::Write as _;

    /// 선형 추세 + 진동 일봉 CSV 작성
    fn write_csv(dir: &std::path::Path, name: &str, bars: usize, step: f64) {
        let mut body = String::from("date,open,high,low,close,volume\n");
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for i in 0..bars {
            let date = start + chrono::Days::new(i as u64);
            let swing = if i % 3 == 0 { 0.8 } else { -0.4 };
            let close = 100.0 + step * i as f64 + swing;
            writeln!(
                body,
                "{},{:.2},{:.2},{:.2},{:.2},{}",
                date,
                close,
                close + 1.0,
                close - 1.0,
                close,
                100_000 + (i % 7) * 1000
            )
            .unwrap();
        }
        fs::write(dir.join(format!("{}.csv", name)), body).unwrap();
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ranker-rank-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_rank_directory() {
        let dir = temp_dir("scan");
        write_csv(&dir, "up", 80, 0.5);
        write_csv(&dir, "flat", 80, 0.0);
        write_csv(&dir, "down", 80, -0.5);
        write_csv(&dir, "short", 10, 0.5);
        fs::write(
            dir.join("broken.csv"),
            "date,open,high,low,close,volume\n2024-01-01,1,1,1,abc,1\n",
        )
        .unwrap();

        let options = RankOptions {
            data_dir: Some(dir.clone()),
            top_n: Some(2),
            horizon_days: Some(10),
            ..Default::default()
        };
        let report = run_rank(&AppConfig::default(), &options).await.unwrap();

        assert_eq!(report.evaluated, 5);
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.ranked.len(), 2);
        assert_eq!(report.insufficient_data, 1);
        assert_eq!(report.other_failures, 1);
        assert!(report.ranked.entries()[0].score.composite_score
            >= report.ranked.entries()[1].score.composite_score);
        assert_eq!(report.ranked.entries()[0].forecast.forecast_days, 10);

        let table = render_report(&report, OutputFormat::Table).unwrap();
        assert!(table.contains("RANK"));
        assert!(table.contains("SHORT"));
        assert!(table.contains("BROKEN"));

        let json = render_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ranked"]["entries"].as_array().unwrap().len(), 2);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_empty_report_renders() {
        let table = format_table(&ScanReport::default());
        assert!(table.contains("랭킹 결과 없음"));
    }
}
