//! 공통 설정.
//!
//! 로깅과 스캔 실행에 관한 설정 섹션을 정의합니다.
//! 점수/예측 파라미터는 `ranker-analytics`에서 정의하며,
//! 설정 파일 전체(`AppConfig`)는 CLI에서 조합합니다.

use serde::{Deserialize, Serialize};

use crate::logging::{LogConfig, LogFormat};

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 종목별 span 진입/종료 로그
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// 초기화용 `LogConfig`로 변환합니다.
    ///
    /// 알 수 없는 형식 문자열은 pretty로 처리합니다.
    pub fn to_log_config(&self) -> LogConfig {
        let format = self.format.parse().unwrap_or(LogFormat::Pretty);
        LogConfig::new(self.level.clone())
            .with_format(format)
            .with_span_events(self.span_events)
    }
}

/// 다종목 스캔 실행 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 최종 랭킹에 남길 종목 수
    pub top_n: usize,
    /// 가격 예측 기간 (일)
    pub horizon_days: u32,
    /// 동시에 계산할 최대 종목 수 (0 = CPU 코어 수)
    pub parallelism: usize,
    /// OHLCV CSV 파일 디렉토리
    pub data_dir: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            horizon_days: 14,
            parallelism: 0,
            data_dir: "data".to_string(),
        }
    }
}

impl ScanConfig {
    /// 실제 사용할 병렬도를 반환합니다.
    pub fn effective_parallelism(&self) -> usize {
        if self.parallelism > 0 {
            return self.parallelism;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}
