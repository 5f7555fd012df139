//! Formatting helpers for progress and summary output.

/// Compact count with K/M suffix, for log lines.
///
/// # Examples
/// ```
/// use sievelists::utils::format_count;
/// assert_eq!(format_count(42), "42");
/// assert_eq!(format_count(2500), "2.5K");
/// assert_eq!(format_count(3_200_000), "3.2M");
/// ```
pub fn format_count(count: usize) -> String {
    match count {
        c if c >= 1_000_000 => format!("{:.1}M", c as f64 / 1_000_000.0),
        c if c >= 1_000 => format!("{:.1}K", c as f64 / 1_000.0),
        c => c.to_string(),
    }
}

/// Human-readable byte size (binary units).
///
/// # Examples
/// ```
/// use sievelists::utils::format_bytes;
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(2048), "2.0 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [(&str, u64); 3] = [("GB", 1 << 30), ("MB", 1 << 20), ("KB", 1 << 10)];

    UNITS
        .iter()
        .find(|(_, size)| bytes >= *size)
        .map(|(unit, size)| format!("{:.1} {}", bytes as f64 / *size as f64, unit))
        .unwrap_or_else(|| format!("{} B", bytes))
}
