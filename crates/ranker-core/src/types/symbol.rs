//! 종목 심볼 정의.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SeriesError;

/// 종목 티커 심볼 (예: AAPL, BRK.B).
///
/// 앞뒤 공백을 제거하고 대문자로 정규화합니다.
/// `Ord`는 랭킹의 동점 처리(사전순)에 사용됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// 새 심볼을 생성합니다. 빈 문자열이면 에러.
    pub fn new(ticker: impl AsRef<str>) -> Result<Self, SeriesError> {
        let normalized = ticker.as_ref().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(SeriesError::EmptySymbol);
        }
        Ok(Self(normalized))
    }

    /// 티커 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
