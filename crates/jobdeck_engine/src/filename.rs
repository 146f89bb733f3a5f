use sha2::{Digest, Sha256};

/// Maps a storage key to a portable file name.
///
/// Keys that are already safe are used verbatim. Anything else is sanitized
/// and suffixed with a short hash of the original key, so two keys that
/// sanitize to the same text still land in different files.
pub fn key_filename(key: &str) -> String {
    let sanitized = sanitize_key(key);
    if sanitized == key {
        sanitized
    } else {
        format!("{sanitized}--{}", short_hash(key))
    }
}

fn sanitize_key(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let mut cleaned = cleaned.trim_matches(&[' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "key".to_string();
    }
    if cleaned.len() > 80 {
        let mut end = 80;
        while !cleaned.is_char_boundary(end) {
            end -= 1;
        }
        cleaned.truncate(end);
    }
    if is_reserved_windows_name(&cleaned) {
        cleaned.push('_');
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    let stem = name.split('.').next().unwrap_or(name);
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(stem))
}

fn short_hash(input: &str) -> String {
    Sha256::digest(input.as_bytes())
        .iter()
        .take(4)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
