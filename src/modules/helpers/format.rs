/// # format a time in milliseconds
/// formats as `m:ss.mmm`. absent and zero times are shown as `-`
///
/// ## Arguments
/// * `ms` - the time in milliseconds
///
/// ## Returns
/// * `String` - the formatted time
pub fn format_ms(ms: Option<u64>) -> String {
    let ms = match ms {
        Some(ms) if ms > 0 => ms,
        _ => return "-".to_string(),
    };

    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let milli = ms % 1000;
    format!("{minutes}:{seconds:02}.{milli:03}")
}
