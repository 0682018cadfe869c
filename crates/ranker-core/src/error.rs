//! 도메인 에러 타입.
//!
//! 가격 시계열 구성 단계에서 발생하는 에러를 정의합니다.
//! 지표/점수/예측 계산 에러는 `ranker-analytics`에 있습니다.

use chrono::NaiveDate;
use thiserror::Error;

/// 가격 시계열 검증 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// 심볼이 비어 있음
    #[error("심볼이 비어 있습니다")]
    EmptySymbol,

    /// 날짜 오름차순 위반
    #[error("날짜 순서 오류: {previous} 다음에 {current}")]
    OutOfOrder {
        previous: NaiveDate,
        current: NaiveDate,
    },

    /// 중복 날짜
    #[error("중복 날짜: {0}")]
    DuplicateDate(NaiveDate),

    /// 음수 가격 또는 거래량
    #[error("음수 값: {date} {field}")]
    NegativeValue { date: NaiveDate, field: &'static str },
}

/// 시계열 작업을 위한 Result 타입.
pub type SeriesResult<T> = Result<T, SeriesError>;
