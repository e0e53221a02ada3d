/// Format a view count with comma thousands separators, e.g. 1234567 -> "1,234,567".
pub fn format_views(views: u64) -> String {
    let digits = views.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(ch);
    }

    formatted
}

pub fn extract_video_id(url: &str) -> Option<String> {
    if let Some(captures) = regex::Regex::new(
        r"(?:music\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{1,11})",
    )
    .ok()?
    .captures(url)
    {
        return captures.get(1).map(|m| m.as_str().to_string());
    }
    None
}
