use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bar bucket size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Timeframe {
    /// Daily bars
    #[serde(rename = "1d")]
    Daily,
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timeframe::Daily => write!(f, "1d"),
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Timeframe::Daily),
            other => Err(format!("unknown timeframe: {other}")),
        }
    }
}

/// One OHLCV observation. Prices are exact decimals and deserialize from
/// either JSON numbers or decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub instrument_id: String,
    pub timeframe: Timeframe,
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

impl Bar {
    /// `high` bounds the body from above and `low` from below.
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }

    /// Closing at or above the open counts as an up bar.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn bar(open: &str, high: &str, low: &str, close: &str) -> Bar {
        Bar {
            instrument_id: "7203".to_string(),
            timeframe: Timeframe::Daily,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap(),
            open: Decimal::from_str(open).unwrap(),
            high: Decimal::from_str(high).unwrap(),
            low: Decimal::from_str(low).unwrap(),
            close: Decimal::from_str(close).unwrap(),
            volume: 1000,
        }
    }

    #[test]
    fn timeframe_round_trips_through_str() {
        assert_eq!(Timeframe::Daily.to_string(), "1d");
        assert_eq!("1d".parse::<Timeframe>().unwrap(), Timeframe::Daily);
        assert!("1h".parse::<Timeframe>().is_err());
    }

    #[test]
    fn deserializes_prices_from_strings_and_numbers() {
        let json = r#"{
            "instrument_id": "7203",
            "timeframe": "1d",
            "timestamp": "2025-01-06T00:00:00Z",
            "open": "1500.1",
            "high": 1510.5,
            "low": "1490.0",
            "close": 1505,
            "volume": 250000
        }"#;
        let parsed: Bar = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.open, Decimal::from_str("1500.1").unwrap());
        assert_eq!(parsed.high, Decimal::from_str("1510.5").unwrap());
        assert_eq!(parsed.close, Decimal::from(1505));
        assert_eq!(parsed.volume, 250000);
    }

    #[test]
    fn rejects_negative_volume() {
        let json = r#"{
            "instrument_id": "7203",
            "timeframe": "1d",
            "timestamp": "2025-01-06T00:00:00Z",
            "open": "1", "high": "1", "low": "1", "close": "1",
            "volume": -5
        }"#;
        assert!(serde_json::from_str::<Bar>(json).is_err());
    }

    #[test]
    fn well_formed_checks_wick_bounds() {
        assert!(bar("10", "12", "9", "11").is_well_formed());
        assert!(!bar("10", "10.5", "9", "11").is_well_formed());
        assert!(!bar("10", "12", "10.5", "11").is_well_formed());
    }

    #[test]
    fn tie_counts_as_up() {
        assert!(bar("10", "10", "10", "10").is_up());
        assert!(!bar("10", "10", "9", "9.99").is_up());
    }
}
