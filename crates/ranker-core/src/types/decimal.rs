//! 가격/거래량 표현을 위한 Decimal 유틸리티.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 가격 타입.
pub type Price = Decimal;

/// 거래량 타입.
pub type Quantity = Decimal;

/// Decimal ↔ f64 변환 확장 트레이트.
///
/// 지표 계산은 Decimal로, 통계/점수 계산은 f64로 수행합니다.
pub trait DecimalExt {
    /// f64로 변환합니다. 표현 불가능한 값이면 `None`.
    fn to_f64_checked(&self) -> Option<f64>;
}

impl DecimalExt for Decimal {
    fn to_f64_checked(&self) -> Option<f64> {
        self.to_f64().filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_f64_checked() {
        assert_eq!(dec!(104.25).to_f64_checked(), Some(104.25));
        assert_eq!(Decimal::ZERO.to_f64_checked(), Some(0.0));
    }
}
