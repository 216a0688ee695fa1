//! Small helpers shared between the server and the bot.

/// Normalize a Russian phone number to canonical `+7...` form.
///
/// Strips every non-digit, maps a leading `8` to `7` (domestic dialing
/// prefix) and prepends `7` when the country code is missing. The digits are
/// kept in full, so an over-long number stays over-long rather than being
/// silently cut down to a different, plausible-looking one. Returns an empty
/// string for input with no digits at all.
pub fn normalize_phone(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }
    if let Some(rest) = digits.strip_prefix('8') {
        digits = format!("7{rest}");
    }
    if !digits.starts_with('7') {
        digits = format!("7{digits}");
    }
    format!("+{digits}")
}

/// Parse a comma-separated id list, dropping (and logging) entries that are not valid integers.
pub fn parse_id_list(raw: &str, var: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| {
            s.parse::<i64>().map_err(|e| log::warn!("🪛️ Ignoring invalid id ({s}) in {var}: {e}")).ok()
        })
        .collect()
}
