use chrono::Local;

/// `"2024-03-07"` -> `"2024년 03월 07일"`.
///
/// Segments are used as written, so zero padding is preserved. Input that is
/// not three dash-separated segments is returned unchanged.
pub fn format_date_label(date: &str) -> String {
    let mut parts = date.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => format!("{}년 {}월 {}일", year, month, day),
        _ => date.to_string(),
    }
}

/// Today's date in the local time zone (not UTC) as `YYYY-MM-DD`. Used when
/// the page is opened without an explicit date.
pub fn local_today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
