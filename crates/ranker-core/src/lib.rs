//! # Ranker Core
//!
//! 종목 랭킹 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 엔진 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일봉 OHLCV 데이터 및 가격 시계열
//! - 심볼 정의
//! - 지표 스냅샷, 종합 점수, 가격 예측, 랭킹 결과 레코드
//! - 로깅 인프라
//! - 공통 설정

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
