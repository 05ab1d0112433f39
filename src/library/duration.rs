//! Parsing of human-readable track lengths (`m:ss` / `h:mm:ss`).

/// Parse a duration label into whole seconds.
///
/// Accepts `m:ss` and `h:mm:ss`. Every component after the first must be
/// below 60, and the total must be positive. Returns `None` otherwise.
pub fn parse_duration_label(label: &str) -> Option<u32> {
    let parts: Vec<&str> = label.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let mut total: u32 = 0;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let value: u32 = part.parse().ok()?;
        if i > 0 && value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }

    (total > 0).then_some(total)
}

/// Format whole seconds as `m:ss`, the way durations are labelled in the catalog.
pub fn format_mss(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
