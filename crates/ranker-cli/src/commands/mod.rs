//! CLI 명령어 구현 모듈.

pub mod forecast;
pub mod loader;
pub mod rank;
pub mod score;

use clap::ValueEnum;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 사람이 읽는 표
    #[default]
    Table,
    /// JSON
    Json,
}

/// 긴 문자열을 표 칸 너비에 맞게 자릅니다.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
