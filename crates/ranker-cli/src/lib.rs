//! 종목 랭킹 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 로컬 OHLCV CSV 로딩
//! - 다종목 스캔 및 랭킹 출력
//! - 단일 종목 점수/예측 출력
//! - 설정 파일 + 환경 변수 관리

pub mod commands;
pub mod config;

pub use config::AppConfig;
