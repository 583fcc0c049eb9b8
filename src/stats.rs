//! Size statistics shown next to conversion results
//!
//! Savings are plain byte-length differences. Nothing is clamped, so an
//! output larger than its source reports negative savings.

use crate::state::ConversionResult;

const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];

/// Size reduction in percent, 0 when `original` is 0
pub fn savings_percent(original: u64, converted: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - converted as f64) / original as f64 * 100.0
}

/// Savings over the summed sizes of all results
pub fn aggregate_savings(results: &[ConversionResult]) -> f64 {
    let original: u64 = results.iter().map(|r| r.original_size).sum();
    let converted: u64 = results.iter().map(|r| r.converted_size).sum();
    savings_percent(original, converted)
}

/// Human-readable size: base 1024, at most two decimals, trailing zeros trimmed
///
/// Sizes past the MB range stay in MB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Signed percentage with one decimal (e.g., "23.3%", "-12.0%")
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TargetFormat;

    fn result(original: u64, converted: u64) -> ConversionResult {
        ConversionResult {
            name: "x.webp".into(),
            data: bytes::Bytes::new(),
            original_size: original,
            converted_size: converted,
            original_format: "PNG".into(),
            output_format: TargetFormat::Webp,
        }
    }

    #[test]
    fn test_aggregate_savings() {
        let results = vec![result(1000, 500), result(2000, 1800)];
        let savings = aggregate_savings(&results);
        assert!((savings - 23.333_333).abs() < 1e-4);
        assert_eq!(format_percent(savings), "23.3%");
    }

    #[test]
    fn test_negative_savings_are_not_clamped() {
        let r = result(1000, 1120);
        assert!((r.savings_percent() + 12.0).abs() < 1e-9);
        assert_eq!(format_percent(r.savings_percent()), "-12.0%");
    }

    #[test]
    fn test_zero_original_size() {
        assert_eq!(savings_percent(0, 50), 0.0);
        assert_eq!(aggregate_savings(&[]), 0.0);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3072 MB");
    }
}
