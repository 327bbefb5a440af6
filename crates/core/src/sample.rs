use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One reading of the three sensor channels plus the instant it was taken.
///
/// Produced by the poller from the upstream JSON document; immutable once
/// parsed. All three values are guaranteed finite by the parse layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// When the reading was taken (upstream clock, converted to local time).
    pub timestamp: DateTime<Local>,
    /// Rotational speed in revolutions per minute.
    pub rpm: f64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Current draw in amperes.
    pub current: f64,
}

impl Sample {
    /// Project a single channel out of the sample.
    #[must_use]
    pub fn value(&self, field: SensorField) -> f64 {
        match field {
            SensorField::Rpm => self.rpm,
            SensorField::Temperature => self.temperature,
            SensorField::Current => self.current,
        }
    }
}

/// The three sensor channels shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorField {
    Rpm,
    Temperature,
    Current,
}

impl SensorField {
    /// All channels in display order (cards left-to-right, charts top-down).
    pub const ALL: [SensorField; 3] = [
        SensorField::Rpm,
        SensorField::Temperature,
        SensorField::Current,
    ];

    /// Human-readable channel name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SensorField::Rpm => "RPM",
            SensorField::Temperature => "Temperature",
            SensorField::Current => "Current",
        }
    }

    /// Display unit. RPM is unitless on axes and tooltips.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            SensorField::Rpm => "",
            SensorField::Temperature => "°C",
            SensorField::Current => "A",
        }
    }

    /// Fraction digits used on chart ticks and readouts.
    #[must_use]
    pub fn precision(self) -> usize {
        match self {
            SensorField::Rpm => 0,
            SensorField::Temperature => 1,
            SensorField::Current => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Sample {
        Sample {
            timestamp: Local.timestamp_opt(1, 0).unwrap(),
            rpm: 100.0,
            temperature: 25.5,
            current: 1.2,
        }
    }

    #[test]
    fn value_projects_each_field() {
        let s = sample();
        assert_eq!(s.value(SensorField::Rpm), 100.0);
        assert_eq!(s.value(SensorField::Temperature), 25.5);
        assert_eq!(s.value(SensorField::Current), 1.2);
    }

    #[test]
    fn units_match_display_contract() {
        assert_eq!(SensorField::Rpm.unit(), "");
        assert_eq!(SensorField::Temperature.unit(), "°C");
        assert_eq!(SensorField::Current.unit(), "A");
    }
}
