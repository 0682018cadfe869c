//! 구간별 점수 테이블.
//!
//! 지표 값을 구간(bucket)에 매핑하여 0-100 점수로 변환합니다.
//! 구간은 상한 오름차순으로 검사하며 처음 일치하는 구간의 점수를 사용하므로
//! 모든 실수 값은 정확히 하나의 점수에 매핑됩니다.

use serde::{Deserialize, Serialize};

/// 점수 구간.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// 구간 상한
    pub upper: f64,
    /// 상한 포함 여부 (기본: 미포함)
    #[serde(default)]
    pub inclusive: bool,
    /// 구간 점수
    pub score: f64,
}

impl Bucket {
    /// 상한 미포함 구간 (`value < upper`).
    pub const fn below(upper: f64, score: f64) -> Self {
        Self {
            upper,
            inclusive: false,
            score,
        }
    }

    /// 상한 포함 구간 (`value <= upper`).
    pub const fn up_to(upper: f64, score: f64) -> Self {
        Self {
            upper,
            inclusive: true,
            score,
        }
    }

    fn contains(&self, value: f64) -> bool {
        value < self.upper || (self.inclusive && value == self.upper)
    }
}

/// 구간 점수 테이블.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointTable {
    /// 상한 오름차순 구간 목록
    pub buckets: Vec<Bucket>,
    /// 모든 구간 상한 이상일 때의 점수
    pub above: f64,
}

impl BreakpointTable {
    /// 테이블을 생성합니다.
    pub fn new(buckets: Vec<Bucket>, above: f64) -> Self {
        Self { buckets, above }
    }

    /// 값에 해당하는 점수를 반환합니다.
    pub fn lookup(&self, value: f64) -> f64 {
        self.buckets
            .iter()
            .find(|b| b.contains(value))
            .map(|b| b.score)
            .unwrap_or(self.above)
    }

    /// 상한이 오름차순이고 점수가 0-100인지 검증합니다.
    pub fn validate(&self, name: &str) -> Result<(), String> {
        for pair in self.buckets.windows(2) {
            let ordered = pair[0].upper < pair[1].upper
                || (pair[0].upper == pair[1].upper && pair[0].inclusive && !pair[1].inclusive);
            if !ordered {
                return Err(format!("{} 테이블 구간 상한이 오름차순이 아닙니다", name));
            }
        }

        let scores = self
            .buckets
            .iter()
            .map(|b| b.score)
            .chain(std::iter::once(self.above));
        for score in scores {
            if !(0.0..=100.0).contains(&score) {
                return Err(format!("{} 테이블 점수 범위 오류: {}", name, score));
            }
        }

        if self.buckets.iter().any(|b| !b.upper.is_finite()) {
            return Err(format!("{} 테이블 상한은 유한해야 합니다", name));
        }

        Ok(())
    }

    /// RSI 테이블: <30→85, [30,40)→95, [40,50)→75, [50,60)→60, [60,70)→40, ≥70→20
    pub fn rsi() -> Self {
        Self::new(
            vec![
                Bucket::below(30.0, 85.0),
                Bucket::below(40.0, 95.0),
                Bucket::below(50.0, 75.0),
                Bucket::below(60.0, 60.0),
                Bucket::below(70.0, 40.0),
            ],
            20.0,
        )
    }

    /// 거래량 비율 테이블: <0.8→30, [0.8,1.0)→45, [1.0,1.2)→60, [1.2,1.5)→75, ≥1.5→90
    pub fn volume() -> Self {
        Self::new(
            vec![
                Bucket::below(0.8, 30.0),
                Bucket::below(1.0, 45.0),
                Bucket::below(1.2, 60.0),
                Bucket::below(1.5, 75.0),
            ],
            90.0,
        )
    }

    /// 모멘텀 테이블: <-2→10, [-2,0)→40, [0,2)→60, [2,5]→80, >5→100
    pub fn momentum() -> Self {
        Self::new(
            vec![
                Bucket::below(-2.0, 10.0),
                Bucket::below(0.0, 40.0),
                Bucket::below(2.0, 60.0),
                Bucket::up_to(5.0, 80.0),
            ],
            100.0,
        )
    }
}

/// 점수 테이블 묶음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakpointTables {
    pub rsi: BreakpointTable,
    pub volume: BreakpointTable,
    pub momentum: BreakpointTable,
}

impl Default for BreakpointTables {
    fn default() -> Self {
        Self {
            rsi: BreakpointTable::rsi(),
            volume: BreakpointTable::volume(),
            momentum: BreakpointTable::momentum(),
        }
    }
}

impl BreakpointTables {
    pub fn validate(&self) -> Result<(), String> {
        self.rsi.validate("rsi")?;
        self.volume.validate("volume")?;
        self.momentum.validate("momentum")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rsi_boundaries() {
        let table = BreakpointTable::rsi();
        assert_eq!(table.lookup(29.99), 85.0);
        assert_eq!(table.lookup(30.0), 95.0);
        assert_eq!(table.lookup(45.0), 75.0);
        assert_eq!(table.lookup(50.0), 60.0);
        assert_eq!(table.lookup(69.99), 40.0);
        assert_eq!(table.lookup(70.0), 20.0);
        assert_eq!(table.lookup(100.0), 20.0);
    }

    #[test]
    fn test_volume_boundaries() {
        let table = BreakpointTable::volume();
        assert_eq!(table.lookup(0.0), 30.0);
        assert_eq!(table.lookup(0.8), 45.0);
        assert_eq!(table.lookup(1.0), 60.0);
        assert_eq!(table.lookup(1.2), 75.0);
        assert_eq!(table.lookup(1.5), 90.0);
    }

    #[test]
    fn test_momentum_boundaries() {
        let table = BreakpointTable::momentum();
        assert_eq!(table.lookup(-2.01), 10.0);
        assert_eq!(table.lookup(-2.0), 40.0);
        assert_eq!(table.lookup(0.0), 60.0);
        assert_eq!(table.lookup(2.0), 80.0);
        assert_eq!(table.lookup(5.0), 80.0);
        assert_eq!(table.lookup(5.01), 100.0);
    }

    #[test]
    fn test_default_tables_are_valid() {
        assert!(BreakpointTables::default().validate().is_ok());
    }

    #[test]
    fn test_unordered_table_is_rejected() {
        let table = BreakpointTable::new(
            vec![Bucket::below(50.0, 10.0), Bucket::below(30.0, 20.0)],
            0.0,
        );
        assert!(table.validate("bad").is_err());

        let table = BreakpointTable::new(vec![Bucket::below(50.0, 120.0)], 0.0);
        assert!(table.validate("bad").is_err());
    }

    proptest! {
        #[test]
        fn prop_rsi_maps_to_exactly_one_bucket(value in -1000.0f64..1000.0) {
            let table = BreakpointTable::rsi();
            let matching = table.buckets.iter().filter(|b| b.contains(value)).count();
            let score = table.lookup(value);

            // 첫 번째로 일치하는 구간 또는 상한 초과 점수
            let first = table.buckets.iter().position(|b| b.contains(value));
            match first {
                Some(idx) => {
                    prop_assert_eq!(score, table.buckets[idx].score);
                    // 이전 구간은 모두 불일치
                    prop_assert!(table.buckets[..idx].iter().all(|b| !b.contains(value)));
                }
                None => {
                    prop_assert_eq!(matching, 0);
                    prop_assert_eq!(score, table.above);
                }
            }
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn prop_rsi_buckets_are_disjoint_intervals(value in 0.0f64..100.0) {
            // 구간 [prev_upper, upper)에 정확히 하나만 속함
            let table = BreakpointTable::rsi();
            let mut lower = f64::NEG_INFINITY;
            let mut hits = 0;
            for bucket in &table.buckets {
                if value >= lower && bucket.contains(value) {
                    hits += 1;
                }
                lower = bucket.upper;
            }
            if value >= lower {
                hits += 1;
            }
            prop_assert_eq!(hits, 1);
        }
    }
}
