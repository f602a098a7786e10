//! Integration Tests for the feature contract
//!
//! Calendar encoding, named input and vector layout working together.

#[cfg(test)]
mod integration_tests {
    use crate::logic::features::{
        calendar::{encode_day, encode_month},
        layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_RANGES},
        vector::{FeatureVector, FireWeatherInput},
    };

    /// A dataset row encoded by name lands in the same slots as the named input
    #[test]
    fn test_encoded_row_matches_named_input() {
        let month = encode_month("mar").unwrap() as f64;
        let day = encode_day("fri").unwrap() as f64;

        let input = FireWeatherInput {
            x: 7.0,
            y: 5.0,
            month,
            day,
            ffmc: 86.2,
            dmc: 26.2,
            dc: 94.3,
            isi: 5.1,
            temp: 8.2,
            rh: 51.0,
            wind: 6.7,
            rain: 0.0,
        };
        let vector = FeatureVector::from(input);

        assert_eq!(vector.get(feature_index("month").unwrap()), Some(7.0));
        assert_eq!(vector.get(feature_index("day").unwrap()), Some(0.0));
        assert_eq!(vector.get_by_name("DC"), Some(94.3));
        assert!(vector.validate().is_ok());
        assert!(vector.validate_ranges().is_ok());
    }

    /// Every encoded calendar value fits the declared domain
    #[test]
    fn test_calendar_codes_within_ranges() {
        let month_range = FEATURE_RANGES[feature_index("month").unwrap()];
        let day_range = FEATURE_RANGES[feature_index("day").unwrap()];

        for name in ["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"] {
            assert!(month_range.contains(encode_month(name).unwrap() as f64), "{}", name);
        }
        for name in ["mon", "tue", "wed", "thu", "fri", "sat", "sun"] {
            assert!(day_range.contains(encode_day(name).unwrap() as f64), "{}", name);
        }
    }

    /// Serialized vectors survive a JSON round trip with layout metadata intact
    #[test]
    fn test_vector_json_roundtrip() {
        let vector = FeatureVector::from(FireWeatherInput::default());
        let json = serde_json::to_string(&vector).unwrap();
        let back: FeatureVector = serde_json::from_str(&json).unwrap();

        assert_eq!(back, vector);
        assert!(back.is_compatible());
        assert_eq!(back.feature_names().len(), FEATURE_COUNT);
        assert_eq!(back.feature_names(), FEATURE_LAYOUT);
    }
}
