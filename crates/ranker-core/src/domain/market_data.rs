//! 시장 데이터 타입.
//!
//! - `PriceBar` - 일봉 OHLCV 데이터
//! - `PriceSeries` - 한 종목의 날짜 오름차순 일봉 시계열

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SeriesError, SeriesResult};
use crate::types::{Price, Quantity, Symbol};

/// 일봉 OHLCV 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Price,
    /// 고가 (제공되지 않으면 0)
    pub high: Price,
    /// 저가 (제공되지 않으면 0)
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량
    pub volume: Quantity,
}

impl PriceBar {
    /// 새 일봉을 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Quantity,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 종가만 있는 일봉을 생성합니다 (시가=고가=저가=종가).
    pub fn from_close(date: NaiveDate, close: Price, volume: Quantity) -> Self {
        Self::new(date, close, close, close, close, volume)
    }

    /// 고가/저가 정보가 있는지 확인합니다.
    pub fn has_range(&self) -> bool {
        self.high > Decimal::ZERO && self.low > Decimal::ZERO && self.high >= self.low
    }

    /// 지지선 계산용 저가 (저가가 없으면 종가).
    pub fn effective_low(&self) -> Price {
        if self.has_range() {
            self.low
        } else {
            self.close
        }
    }

    /// 저항선 계산용 고가 (고가가 없으면 종가).
    pub fn effective_high(&self) -> Price {
        if self.has_range() {
            self.high
        } else {
            self.close
        }
    }

    /// 실제 범위 (True Range).
    ///
    /// max(고가 - 저가, |고가 - 전일 종가|, |저가 - 전일 종가|)
    pub fn true_range(&self, prev_close: Price) -> Decimal {
        let high = self.effective_high();
        let low = self.effective_low();
        let high_low = high - low;
        let high_close = (high - prev_close).abs();
        let low_close = (low - prev_close).abs();
        high_low.max(high_close).max(low_close)
    }
}

/// 한 종목의 일봉 시계열.
///
/// 날짜 오름차순, 중복 날짜 없음이 생성 시점에 보장됩니다.
/// 최소 길이는 계산 단계에서 확인합니다 (`InsufficientData`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// 시계열을 생성하고 순서/중복/음수 값을 검증합니다.
    pub fn new(symbol: Symbol, bars: Vec<PriceBar>) -> SeriesResult<Self> {
        for (i, bar) in bars.iter().enumerate() {
            if bar.close < Decimal::ZERO {
                return Err(SeriesError::NegativeValue {
                    date: bar.date,
                    field: "close",
                });
            }
            if bar.volume < Decimal::ZERO {
                return Err(SeriesError::NegativeValue {
                    date: bar.date,
                    field: "volume",
                });
            }
            if i == 0 {
                continue;
            }
            let previous = bars[i - 1].date;
            if bar.date == previous {
                return Err(SeriesError::DuplicateDate(bar.date));
            }
            if bar.date < previous {
                return Err(SeriesError::OutOfOrder {
                    previous,
                    current: bar.date,
                });
            }
        }

        Ok(Self { symbol, bars })
    }

    /// 정렬되지 않은 일봉을 날짜순으로 정렬한 뒤 시계열을 생성합니다.
    ///
    /// 외부 데이터 소스가 역순으로 데이터를 주는 경우에 사용합니다.
    /// 중복 날짜는 여전히 에러입니다.
    pub fn from_unsorted(symbol: Symbol, mut bars: Vec<PriceBar>) -> SeriesResult<Self> {
        bars.sort_by(|a, b| a.date.cmp(&b.date));
        Self::new(symbol, bars)
    }

    /// 종목 심볼.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// 전체 일봉.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// 일봉 개수.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 마지막 일봉.
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// 마지막 종가.
    pub fn last_close(&self) -> Option<Price> {
        self.bars.last().map(|b| b.close)
    }

    /// 최근 `n`개 일봉 (부족하면 전체).
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    /// 종가 벡터.
    pub fn closes(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// 거래량 벡터.
    pub fn volumes(&self) -> Vec<Quantity> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn symbol() -> Symbol {
        Symbol::new("TEST").unwrap()
    }

    #[test]
    fn test_series_accepts_ascending_dates() {
        let bars = (1..=5)
            .map(|d| PriceBar::from_close(day(d), Decimal::from(100 + d), dec!(1000)))
            .collect();
        let series = PriceSeries::new(symbol(), bars).unwrap();

        assert_eq!(series.len(), 5);
        assert_eq!(series.last_close(), Some(dec!(105)));
        assert_eq!(series.tail(2).len(), 2);
        assert_eq!(series.tail(10).len(), 5);
    }

    #[test]
    fn test_series_rejects_duplicates_and_disorder() {
        let dup = vec![
            PriceBar::from_close(day(1), dec!(10), dec!(1)),
            PriceBar::from_close(day(1), dec!(11), dec!(1)),
        ];
        assert_eq!(
            PriceSeries::new(symbol(), dup).unwrap_err(),
            SeriesError::DuplicateDate(day(1))
        );

        let disordered = vec![
            PriceBar::from_close(day(2), dec!(10), dec!(1)),
            PriceBar::from_close(day(1), dec!(11), dec!(1)),
        ];
        assert!(matches!(
            PriceSeries::new(symbol(), disordered.clone()),
            Err(SeriesError::OutOfOrder { .. })
        ));

        let sorted = PriceSeries::from_unsorted(symbol(), disordered).unwrap();
        assert_eq!(sorted.bars()[0].date, day(1));
    }

    #[test]
    fn test_series_rejects_negative_volume() {
        let bars = vec![PriceBar::from_close(day(1), dec!(10), dec!(-1))];
        assert!(matches!(
            PriceSeries::new(symbol(), bars),
            Err(SeriesError::NegativeValue { field: "volume", .. })
        ));
    }

    #[test]
    fn test_true_range_uses_previous_close_gap() {
        let bar = PriceBar::new(day(2), dec!(105), dec!(106), dec!(104), dec!(105), dec!(1));
        // 갭 상승: |저가 - 전일 종가| = 4 가 가장 큼
        assert_eq!(bar.true_range(dec!(100)), dec!(6));
        assert_eq!(bar.true_range(dec!(105)), dec!(2));
    }

    #[test]
    fn test_missing_range_falls_back_to_close() {
        let bar = PriceBar::new(day(1), dec!(0), dec!(0), dec!(0), dec!(50), dec!(1));
        assert!(!bar.has_range());
        assert_eq!(bar.effective_low(), dec!(50));
        assert_eq!(bar.effective_high(), dec!(50));
    }

    proptest! {
        #[test]
        fn prop_from_unsorted_orders_distinct_dates(
            offsets in prop::collection::hash_set(0u64..500, 1..60),
        ) {
            let start = day(1);
            let bars: Vec<PriceBar> = offsets
                .iter()
                .map(|o| PriceBar::from_close(start + chrono::Days::new(*o), dec!(10), dec!(1)))
                .collect();

            let series = PriceSeries::from_unsorted(symbol(), bars).unwrap();
            prop_assert_eq!(series.len(), offsets.len());
            for pair in series.bars().windows(2) {
                prop_assert!(pair[0].date < pair[1].date);
            }
        }
    }
}
