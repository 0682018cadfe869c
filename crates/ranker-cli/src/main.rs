//! 종목 랭킹 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # data/ 디렉토리의 모든 CSV를 평가하고 상위 5개 출력
//! ranker rank -d data
//!
//! # 설정 파일 지정, JSON 출력
//! ranker -c config/ranker.toml rank --format json
//!
//! # 단일 종목 점수 / 예측
//! ranker score -f data/AAPL.csv
//! ranker forecast -f data/AAPL.csv --horizon 20
//!
//! # 기본 설정 파일 출력
//! ranker config > config/ranker.toml
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use ranker_cli::commands::forecast::run_forecast;
use ranker_cli::commands::rank::{render_report, run_rank, RankOptions};
use ranker_cli::commands::score::run_score;
use ranker_cli::commands::OutputFormat;
use ranker_cli::AppConfig;
use ranker_core::init_logging;

#[derive(Parser)]
#[command(name = "ranker")]
#[command(about = "Stock ranking CLI - 기술적 지표 종합 점수와 가격 예측", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (기본: config/ranker.toml, 없어도 됨)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 디렉토리의 모든 종목을 평가하고 상위 N개 출력
    Rank {
        /// OHLCV CSV 디렉토리 (파일 이름 = 심볼)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// 출력할 종목 수
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// 예측 기간 (일)
        #[arg(long)]
        horizon: Option<u32>,

        /// 출력 형식
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// 진행 표시줄 숨기기
        #[arg(long, default_value = "false")]
        no_progress: bool,
    },

    /// 단일 종목 종합 점수 (JSON)
    Score {
        /// OHLCV CSV 파일
        #[arg(short, long)]
        file: PathBuf,

        /// 현재가 (기본: 마지막 종가)
        #[arg(short, long)]
        price: Option<Decimal>,
    },

    /// 단일 종목 가격 예측 (JSON)
    Forecast {
        /// OHLCV CSV 파일
        #[arg(short, long)]
        file: PathBuf,

        /// 예측 기간 (일, 기본: 설정값)
        #[arg(long)]
        horizon: Option<u32>,
    },

    /// 기본 설정을 TOML로 출력
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("설정 로드 실패")?;
    init_logging(config.logging.to_log_config())
        .map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    match cli.command {
        Commands::Rank {
            data_dir,
            top_n,
            horizon,
            format,
            no_progress,
        } => {
            let options = RankOptions {
                data_dir,
                top_n,
                horizon_days: horizon,
                format,
                progress: !no_progress,
            };

            match run_rank(&config, &options).await {
                Ok(report) => {
                    info!(
                        ranked = report.ranked.len(),
                        failed = report.failed(),
                        "Ranking completed"
                    );
                    println!("{}", render_report(&report, options.format)?);
                }
                Err(e) => {
                    error!("Ranking failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Score { file, price } => {
            let result = run_score(&config, &file, price)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Forecast { file, horizon } => {
            let horizon_days = horizon.unwrap_or(config.scan.horizon_days);
            let result = run_forecast(&config, &file, horizon_days)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Config => {
            print!("{}", AppConfig::default_toml()?);
        }
    }

    Ok(())
}
