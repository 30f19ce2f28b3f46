//! Tag-list normalization
//!
//! Tags are identified by their exact, case-sensitive name.

/// Trim tags, drop empties and duplicates (first occurrence wins), and keep
/// at most `max_count` of them.
pub fn normalize_tags<S: AsRef<str>>(raw: &[S], max_count: usize) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len().min(max_count));
    for tag in raw {
        if tags.len() == max_count {
            break;
        }
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() || tags.iter().any(|t| t == trimmed) {
            continue;
        }
        tags.push(trimmed.to_string());
    }
    tags
}
