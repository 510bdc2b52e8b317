//! Tag input helpers. The store keeps whatever tags it is handed; these
//! functions are what the input path uses to keep them tidy.

/// Longest tag accepted by [`is_valid`], in characters.
pub const MAX_TAG_LEN: usize = 100;

/// Normalize tag name (trim whitespace, case preserved)
pub fn normalize(name: &str) -> String {
    name.trim().to_string()
}

/// Validate tag name
pub fn is_valid(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_TAG_LEN
}

/// Append `name` unless it is invalid or already present. Returns whether it was added.
pub fn push_unique(tags: &mut Vec<String>, name: &str) -> bool {
    if !is_valid(name) {
        return false;
    }
    let name = normalize(name);
    if tags.contains(&name) {
        return false;
    }
    tags.push(name);
    true
}

/// Parse a comma separated list, keeping first occurrences in input order.
pub fn parse_list(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for part in text.split(',') {
        push_unique(&mut tags, part);
    }
    tags
}
