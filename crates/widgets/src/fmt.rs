use dash_core::SensorField;

/// Format the big number on a summary card — always two decimals.
pub fn card_value(value: f64) -> String {
    format!("{value:.2}")
}

/// Unit line under a card's value. Unlike axis ticks, the RPM card does
/// name its unit.
pub fn card_unit(field: SensorField) -> &'static str {
    match field {
        SensorField::Rpm => "rpm",
        SensorField::Temperature => "°C",
        SensorField::Current => "A",
    }
}

/// Format an axis tick or readout value with the channel's unit and
/// precision (RPM unitless at 0 digits, `°C` at 1, `A` at 2).
pub fn tick_label(field: SensorField, value: f64) -> String {
    format!("{:.*}{}", field.precision(), value, field.unit())
}

/// Hover readout, e.g. `Temperature: 25.5°C`.
pub fn hover_label(field: SensorField, value: f64) -> String {
    format!("{}: {}", field.label(), tick_label(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_values_always_two_decimals() {
        assert_eq!(card_value(100.0), "100.00");
        assert_eq!(card_value(25.456), "25.46");
    }

    #[test]
    fn tick_labels_per_channel() {
        assert_eq!(tick_label(SensorField::Rpm, 1234.56), "1235");
        assert_eq!(tick_label(SensorField::Temperature, 25.46), "25.5°C");
        assert_eq!(tick_label(SensorField::Current, 1.2), "1.20A");
    }

    #[test]
    fn hover_labels_name_the_channel() {
        assert_eq!(hover_label(SensorField::Rpm, 1500.0), "RPM: 1500");
        assert_eq!(hover_label(SensorField::Current, 3.305), "Current: 3.31A");
    }
}
