//! Constants describing instruments and bar data.

use serde::{Deserialize, Serialize};

/// Exchange that serves the bar data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// Binance spot
    Binance,
}

impl Exchange {
    /// Get exchange value string
    pub fn value(&self) -> &'static str {
        match self {
            Exchange::Binance => "BINANCE",
        }
    }
}

/// Interval of bar data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 1 minute
    Minute,
    /// 1 hour
    Hour,
    /// Daily
    Daily,
    /// Weekly
    Weekly,
}

impl Interval {
    /// Length of one bar in seconds
    pub fn seconds(&self) -> i64 {
        match self {
            Interval::Minute => 60,
            Interval::Hour => 3_600,
            Interval::Daily => 86_400,
            Interval::Weekly => 604_800,
        }
    }
}
