//! Container code generation.
//!
//! Codes look like `TANK-0001`: a type prefix, a dash and a 1-based,
//! zero-padded sequence number. The prefix comes from the container type's
//! configured `code_prefix`, falling back to a derivation from the type name.

use crate::models::ContainerType;

/// Prefix used when the type name yields no usable word.
pub const FALLBACK_PREFIX: &str = "CONT";

/// Resolve the code prefix for a container type.
pub fn derive_prefix(container_type: &ContainerType) -> String {
    match &container_type.code_prefix {
        Some(prefix) => prefix.clone(),
        None => prefix_from_name(&container_type.name),
    }
}

/// Format a container code from a prefix and a 1-based sequence number.
pub fn format_code(prefix: &str, sequence: u64) -> String {
    format!("{prefix}-{sequence:04}")
}

/// Derive a prefix from a type name: a single word contributes its first
/// four characters, two or more words contribute the initials of the first
/// two. Uppercasing is Unicode-aware.
fn prefix_from_name(name: &str) -> String {
    let words: Vec<&str> = name
        .split_whitespace()
        .filter(|word| word.chars().any(char::is_alphanumeric))
        .collect();

    match words.as_slice() {
        [] => FALLBACK_PREFIX.to_string(),
        [word] => word.chars().take(4).collect::<String>().to_uppercase(),
        [first, second, ..] => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}
