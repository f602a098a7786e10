//! Calendar Encoding - month/day names to feature codes
//!
//! Codes follow sorted-name order, which is how the training dataset's
//! categorical columns were label-encoded. The tables are fixed so the
//! trainer and the scorer always agree, whatever subset of names a
//! dataset happens to contain.

/// Month abbreviations in code order (`apr` = 0 ... `sep` = 11)
pub const MONTH_CODES: [&str; 12] = [
    "apr", "aug", "dec", "feb", "jan", "jul", "jun", "mar", "may", "nov", "oct", "sep",
];

/// Day abbreviations in code order (`fri` = 0 ... `wed` = 6)
pub const DAY_CODES: [&str; 7] = ["fri", "mon", "sat", "sun", "thu", "tue", "wed"];

fn lookup(table: &[&str], name: &str) -> Option<u8> {
    let name = name.trim().to_ascii_lowercase();
    table.iter().position(|&n| n == name).map(|i| i as u8)
}

/// Encode a month abbreviation (case-insensitive)
pub fn encode_month(name: &str) -> Option<u8> {
    lookup(&MONTH_CODES, name)
}

/// Encode a day abbreviation (case-insensitive)
pub fn encode_day(name: &str) -> Option<u8> {
    lookup(&DAY_CODES, name)
}

pub fn decode_month(code: u8) -> Option<&'static str> {
    MONTH_CODES.get(code as usize).copied()
}

pub fn decode_day(code: u8) -> Option<&'static str> {
    DAY_CODES.get(code as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_sorted() {
        let mut months = MONTH_CODES.to_vec();
        months.sort_unstable();
        assert_eq!(months, MONTH_CODES.to_vec());

        let mut days = DAY_CODES.to_vec();
        days.sort_unstable();
        assert_eq!(days, DAY_CODES.to_vec());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode_month("apr"), Some(0));
        assert_eq!(encode_month("Mar"), Some(7));
        assert_eq!(encode_month(" sep "), Some(11));
        assert_eq!(encode_month("march"), None);

        assert_eq!(encode_day("fri"), Some(0));
        assert_eq!(encode_day("WED"), Some(6));
        assert_eq!(encode_day("xyz"), None);
    }

    #[test]
    fn test_decode_roundtrip() {
        for code in 0..12u8 {
            assert_eq!(encode_month(decode_month(code).unwrap()), Some(code));
        }
        for code in 0..7u8 {
            assert_eq!(encode_day(decode_day(code).unwrap()), Some(code));
        }
        assert_eq!(decode_month(12), None);
        assert_eq!(decode_day(7), None);
    }
}
