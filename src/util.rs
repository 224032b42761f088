/// Render a stored unix timestamp for report output.
pub fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%y.%m.%d. %H:%M").to_string())
        .unwrap_or_else(|| String::from("unknown"))
}
