//! 종목 랭킹을 위한 도메인 모델.

mod forecast;
mod indicators;
mod market_data;
mod market_regime;
mod ranking;
mod score;

pub use forecast::*;
pub use indicators::*;
pub use market_data::*;
pub use market_regime::*;
pub use ranking::*;
pub use score::*;
