// Bar source: reads OHLCV bars from CSV, or generates a deterministic sample
// series when no file is available.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use shared::models::{Bar, Timeframe};

// Header: instrument_id,timeframe,timestamp,open,high,low,close,volume
// Example row: 7203,1d,2024-01-04T00:00:00Z,2500.5,2530,2490,2521.5,1830400
pub fn load_bars_from_csv(path: impl AsRef<Path>, delimiter: char) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let delimiter = u8::try_from(delimiter)
        .map_err(|_| anyhow!("CSV delimiter '{}' is not a single byte", delimiter))?;
    let file = File::open(path)
        .map_err(|e| anyhow!("Failed to open CSV file '{}': {}", path.display(), e))?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers()?.clone();
    let mut bars: Vec<Bar> = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2;
        let record =
            result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

        let instrument_id = required_field(&record, &headers, "instrument_id", line)?;
        let timeframe = Timeframe::from_str(required_field(&record, &headers, "timeframe", line)?)
            .map_err(|e| anyhow!("Error parsing 'timeframe' at line {}: {}", line, e))?;
        let raw_timestamp = required_field(&record, &headers, "timestamp", line)?;
        let timestamp = DateTime::parse_from_rfc3339(raw_timestamp)
            .map_err(|e| anyhow!("Error parsing 'timestamp' at line {}: {}", line, e))?
            .with_timezone(&Utc);

        let open = parse_price(&record, &headers, "open", line)?;
        let high = parse_price(&record, &headers, "high", line)?;
        let low = parse_price(&record, &headers, "low", line)?;
        let close = parse_price(&record, &headers, "close", line)?;
        let volume = required_field(&record, &headers, "volume", line)?
            .parse::<u64>()
            .map_err(|e| anyhow!("Error parsing 'volume' at line {}: {}", line, e))?;

        if let Some(prev) = bars.last() {
            if prev.timestamp >= timestamp {
                tracing::warn!(
                    line,
                    %timestamp,
                    previous = %prev.timestamp,
                    "Bars are not in ascending time order."
                );
            }
        }

        bars.push(Bar {
            instrument_id: instrument_id.to_string(),
            timeframe,
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    tracing::info!(path = %path.display(), bars = bars.len(), "Loaded bars from CSV.");
    Ok(bars)
}

/// A daily series starting at `start`. Same inputs always give the same bars,
/// with a mix of up and down candles.
pub fn sample_bars(instrument_id: &str, count: usize, start: DateTime<Utc>) -> Vec<Bar> {
    let mut bars = Vec::with_capacity(count);
    let mut open = Decimal::new(1000, 1);

    for i in 0..count {
        let step = (i as i64 * 7) % 11 - 5;
        let close = (open + Decimal::new(step * 3, 1)).max(Decimal::ONE);
        let wick = Decimal::new((i as i64 % 4) + 1, 1);
        bars.push(Bar {
            instrument_id: instrument_id.to_string(),
            timeframe: Timeframe::Daily,
            timestamp: start + Duration::days(i as i64),
            open,
            high: open.max(close) + wick,
            low: (open.min(close) - wick).max(Decimal::ZERO),
            close,
            volume: 1_000_000 + (i as u64 * 37_000) % 500_000,
        });
        open = close;
    }
    bars
}

fn required_field<'a>(
    record: &'a StringRecord,
    headers: &StringRecord,
    name: &str,
    line: usize,
) -> Result<&'a str> {
    headers
        .iter()
        .position(|header| header == name)
        .and_then(|pos| record.get(pos))
        .map(str::trim)
        .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
}

fn parse_price(
    record: &StringRecord,
    headers: &StringRecord,
    name: &str,
    line: usize,
) -> Result<Decimal> {
    let raw = required_field(record, headers, name, line)?;
    Decimal::from_str(raw).map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", name, line, e))
}
