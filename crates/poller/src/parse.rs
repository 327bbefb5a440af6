use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use dash_core::{DashError, Result, Sample};
use serde::Deserialize;

/// Wire shape of the polled document.
///
/// The bridge script historically wrote timestamps as formatted strings,
/// newer firmware sends Unix seconds — both are accepted.
#[derive(Debug, Deserialize)]
struct RawSample {
    timestamp: RawTimestamp,
    rpm: f64,
    temperature: f64,
    current: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(f64),
    Text(String),
}

/// Parse one polled JSON document into a [`Sample`].
///
/// Fails on missing fields, non-numeric fields, unparseable timestamps and
/// non-finite values — all treated identically by the caller (skip the
/// update, keep the display stale).
pub fn parse_sample(bytes: &[u8]) -> Result<Sample> {
    let raw: RawSample = serde_json::from_slice(bytes)
        .map_err(|e| DashError::Parse(format!("malformed payload: {e}")))?;

    for (name, value) in [
        ("rpm", raw.rpm),
        ("temperature", raw.temperature),
        ("current", raw.current),
    ] {
        if !value.is_finite() {
            return Err(DashError::Parse(format!("non-finite {name}: {value}")));
        }
    }

    Ok(Sample {
        timestamp: parse_timestamp(&raw.timestamp)?,
        rpm: raw.rpm,
        temperature: raw.temperature,
        current: raw.current,
    })
}

fn parse_timestamp(raw: &RawTimestamp) -> Result<DateTime<Local>> {
    match raw {
        RawTimestamp::Seconds(secs) => {
            if !secs.is_finite() {
                return Err(DashError::Parse(format!("non-finite timestamp: {secs}")));
            }
            let millis = (secs * 1_000.0).round() as i64;
            DateTime::from_timestamp_millis(millis)
                .map(|utc| utc.with_timezone(&Local))
                .ok_or_else(|| DashError::Parse(format!("timestamp out of range: {secs}")))
        }
        RawTimestamp::Text(text) => parse_text_timestamp(text),
    }
}

fn parse_text_timestamp(text: &str) -> Result<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Local));
    }

    // Bridge-script format, naive local time.
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| DashError::Parse(format!("bad timestamp '{text}': {e}")))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| DashError::Parse(format!("nonexistent local time '{text}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parse_numeric_timestamp() {
        let sample = parse_sample(
            br#"{"timestamp": 1, "rpm": 100, "temperature": 25.5, "current": 1.2}"#,
        )
        .expect("valid payload");

        assert_eq!(sample.rpm, 100.0);
        assert_eq!(sample.temperature, 25.5);
        assert_eq!(sample.current, 1.2);
        assert_eq!(sample.timestamp.timestamp(), 1);
    }

    #[test]
    fn parse_fractional_seconds() {
        let sample = parse_sample(
            br#"{"timestamp": 1700000000.25, "rpm": 1, "temperature": 2, "current": 3}"#,
        )
        .expect("valid payload");
        assert_eq!(sample.timestamp.timestamp_millis(), 1_700_000_000_250);
    }

    #[test]
    fn parse_bridge_string_timestamp() {
        let sample = parse_sample(
            br#"{"timestamp": "2024-05-01 12:30:45", "rpm": 1500, "temperature": 42, "current": 3.3}"#,
        )
        .expect("valid payload");
        assert_eq!(sample.timestamp.second(), 45);
    }

    #[test]
    fn parse_rfc3339_timestamp() {
        let sample = parse_sample(
            br#"{"timestamp": "2024-05-01T12:30:45Z", "rpm": 1, "temperature": 2, "current": 3}"#,
        )
        .expect("valid payload");
        assert_eq!(sample.timestamp.timestamp(), 1_714_566_645);
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = parse_sample(br#"{"timestamp": 1, "rpm": 100, "temperature": 25.5}"#)
            .expect_err("current missing");
        assert!(matches!(err, DashError::Parse(_)));
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let err = parse_sample(
            br#"{"timestamp": 1, "rpm": "fast", "temperature": 25.5, "current": 1.2}"#,
        )
        .expect_err("rpm not a number");
        assert!(matches!(err, DashError::Parse(_)));
    }

    #[test]
    fn non_finite_value_is_rejected() {
        // 1e999 overflows f64 into infinity during deserialization.
        let err = parse_sample(
            br#"{"timestamp": 1, "rpm": 1e999, "temperature": 25.5, "current": 1.2}"#,
        )
        .expect_err("rpm not finite");
        assert!(matches!(err, DashError::Parse(_)));
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        let err = parse_sample(
            br#"{"timestamp": "yesterday-ish", "rpm": 1, "temperature": 2, "current": 3}"#,
        )
        .expect_err("unparseable timestamp");
        assert!(matches!(err, DashError::Parse(_)));
    }

    #[test]
    fn non_json_body_is_rejected() {
        let err = parse_sample(b"<html>502 Bad Gateway</html>").expect_err("not JSON");
        assert!(matches!(err, DashError::Parse(_)));
    }
}
