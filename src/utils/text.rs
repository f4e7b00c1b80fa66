/// Keeps at most `max_chars` characters of `text`
///
/// Counts Unicode scalar values, not bytes, so multi-byte Vietnamese letters
/// are never split.
///
/// # Example
/// ```
/// use chatvec::utils::text::truncate_chars;
///
/// assert_eq!(truncate_chars("lỗi biên dịch", 3), "lỗi");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Shortens text for one-line display, adding ellipsis if needed
///
/// # Example
/// ```
/// use chatvec::utils::text::preview;
///
/// assert_eq!(preview("Hello, world!", 8), "Hello...");
/// ```
pub fn preview(text: &str, max_len: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_len {
        single_line
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let truncated = truncate_chars(&single_line, max_len - 3);
        format!("{truncated}...")
    }
}
