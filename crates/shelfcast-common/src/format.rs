//! Human-readable renderings of durations and sizes.

/// Binary size units, base 1024.
const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Render whole seconds as `H:MM:SS`, or `D day(s), H:MM:SS` past one day.
///
/// ```
/// use shelfcast_common::format::format_duration;
///
/// assert_eq!(format_duration(303), "0:05:03");
/// assert_eq!(format_duration(125_998), "1 day, 10:59:58");
/// ```
pub fn format_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    let clock = format!("{hours}:{minutes:02}:{seconds:02}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

/// Render a byte count with the largest binary unit keeping the mantissa
/// below 1024, rounded to two decimals.
///
/// A zero size renders as `"0 KB"`.
///
/// ```
/// use shelfcast_common::format::format_size;
///
/// assert_eq!(format_size(1_610_612_736), "1.5 GB");
/// assert_eq!(format_size(0), "0 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", SIZE_UNITS[1]);
    }

    let mut unit = 0;
    let mut scale: u128 = 1;
    while unit + 1 < SIZE_UNITS.len() && u128::from(bytes) >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let mantissa = ((bytes as f64 / scale as f64) * 100.0).round() / 100.0;
    if mantissa.fract() == 0.0 {
        format!("{mantissa:.1} {}", SIZE_UNITS[unit])
    } else {
        format!("{mantissa} {}", SIZE_UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_under_a_day() {
        assert_eq!(format_duration(0), "0:00:00");
        assert_eq!(format_duration(59), "0:00:59");
        assert_eq!(format_duration(3_600), "1:00:00");
        assert_eq!(format_duration(86_399), "23:59:59");
    }

    #[test]
    fn duration_with_days() {
        assert_eq!(format_duration(86_400), "1 day, 0:00:00");
        assert_eq!(format_duration(2 * 86_400 + 5 * 3_600 + 47 * 60 + 47), "2 days, 5:47:47");
    }

    #[test]
    fn size_units() {
        assert_eq!(format_size(1), "1.0 B");
        assert_eq!(format_size(500), "500.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_590_000_000), "1.48 GB");
        assert_eq!(format_size(1_610_612_736), "1.5 GB");
        assert_eq!(format_size(5 * 1024u64.pow(4)), "5.0 TB");
    }

    #[test]
    fn size_zero_falls_back_to_kilobytes() {
        assert_eq!(format_size(0), "0 KB");
    }

    #[test]
    fn size_at_u64_max_stays_in_exabytes() {
        assert!(format_size(u64::MAX).ends_with(" EB"));
    }
}
