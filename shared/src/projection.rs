// Bar projector: bars in, candlestick and volume points out.
use crate::chart::{CandlestickPoint, Projection, VolumePoint, VOLUME_DOWN_COLOR, VOLUME_UP_COLOR};
use crate::models::Bar;
use crate::utils::{decimal_to_f64, to_utc_timestamp};

/// Projects an ordered bar sequence into the two engine series. Input
/// order is kept as is; the sequence is expected to be sorted already.
pub fn project(bars: &[Bar]) -> Projection {
    Projection {
        candles: to_candlestick_data(bars),
        volumes: to_volume_data(bars),
    }
}

pub fn to_candlestick_data(bars: &[Bar]) -> Vec<CandlestickPoint> {
    bars.iter()
        .map(|bar| CandlestickPoint {
            time: to_utc_timestamp(&bar.timestamp),
            open: decimal_to_f64(bar.open),
            high: decimal_to_f64(bar.high),
            low: decimal_to_f64(bar.low),
            close: decimal_to_f64(bar.close),
        })
        .collect()
}

pub fn to_volume_data(bars: &[Bar]) -> Vec<VolumePoint> {
    bars.iter()
        .map(|bar| VolumePoint {
            time: to_utc_timestamp(&bar.timestamp),
            value: bar.volume,
            color: if bar.is_up() {
                VOLUME_UP_COLOR
            } else {
                VOLUME_DOWN_COLOR
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::UtcTimestamp;
    use crate::models::Timeframe;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn create_bar(secs: i64, open: &str, high: &str, low: &str, close: &str, volume: u64) -> Bar {
        Bar {
            instrument_id: "7203".to_string(),
            timeframe: Timeframe::Daily,
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            open: Decimal::from_str(open).unwrap(),
            high: Decimal::from_str(high).unwrap(),
            low: Decimal::from_str(low).unwrap(),
            close: Decimal::from_str(close).unwrap(),
            volume,
        }
    }

    #[test]
    fn test_project_empty() {
        let projection = project(&[]);
        assert!(projection.candles.is_empty());
        assert!(projection.volumes.is_empty());
    }

    #[test]
    fn test_project_single_bar() {
        let projection = project(&[create_bar(1, "10", "12", "9", "11", 500)]);
        assert_eq!(
            projection.candles,
            vec![CandlestickPoint {
                time: UtcTimestamp(1),
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
            }]
        );
        assert_eq!(projection.volumes.len(), 1);
        assert_eq!(projection.volumes[0].value, 500);
        assert_eq!(projection.volumes[0].color, VOLUME_UP_COLOR);
    }

    #[test]
    fn test_project_keeps_length_and_order() {
        // Deliberately unsorted: the projector must not re-sort.
        let bars = vec![
            create_bar(30, "10", "11", "9", "10.5", 1),
            create_bar(10, "10", "11", "9", "9.5", 2),
            create_bar(20, "10", "11", "9", "10", 3),
        ];
        let projection = project(&bars);
        assert_eq!(projection.candles.len(), bars.len());
        assert_eq!(projection.volumes.len(), bars.len());

        let candle_times: Vec<i64> = projection.candles.iter().map(|c| c.time.0).collect();
        let volume_times: Vec<i64> = projection.volumes.iter().map(|v| v.time.0).collect();
        assert_eq!(candle_times, vec![30, 10, 20]);
        assert_eq!(volume_times, vec![30, 10, 20]);
        let values: Vec<u64> = projection.volumes.iter().map(|v| v.value).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_volume_colors_by_direction() {
        let bars = vec![
            create_bar(1, "10", "12", "9", "11", 1),
            create_bar(2, "10", "12", "9", "9", 1),
            create_bar(3, "10", "12", "9", "10", 1),
        ];
        let colors: Vec<&str> = to_volume_data(&bars).iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![VOLUME_UP_COLOR, VOLUME_DOWN_COLOR, VOLUME_UP_COLOR]);
    }

    #[test]
    fn test_color_uses_exact_decimals() {
        // Differ only past f64 precision: close is below open by 1e-20.
        let bars = vec![create_bar(
            1,
            "1.00000000000000000001",
            "2",
            "0.5",
            "1.00000000000000000000",
            1,
        )];
        let volumes = to_volume_data(&bars);
        assert_eq!(volumes[0].color, VOLUME_DOWN_COLOR);
        assert!(!volumes[0].is_up());
    }

    #[test]
    fn test_decimal_string_prices_convert() {
        let bar = create_bar(5, "1502.5", "1510.0", "1498.25", "1507.75", 9);
        let candles = to_candlestick_data(&[bar]);
        assert_eq!(candles[0].open, 1502.5);
        assert_eq!(candles[0].low, 1498.25);
        assert_eq!(candles[0].close, 1507.75);
    }
}
