//! Identifier normalization
//!
//! Converts raw Solidity identifiers into names that follow the casing rules
//! of the binding targets.

use regex::Regex;
use std::sync::OnceLock;

/// Make a camel-case identifier starting with an upper-case character.
///
/// Leading underscores are dropped and every remaining underscore upper-cases
/// the character after it, so `_token_id` becomes `TokenId`.
pub fn capitalize(input: &str) -> String {
    let trimmed = input.trim_start_matches('_');
    if trimmed.is_empty() {
        return String::new();
    }
    map_first(&to_camel_case(trimmed), |c| c.to_uppercase().collect())
}

/// Make a camel-case identifier starting with a lower-case character.
pub fn decapitalize(input: &str) -> String {
    let trimmed = input.trim_start_matches('_');
    if trimmed.is_empty() {
        return String::new();
    }
    map_first(&to_camel_case(trimmed), |c| c.to_lowercase().collect())
}

/// Fold `_x` runs into `X`. The first character is left untouched.
pub fn to_camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut upper_next = false;

    for c in input.chars() {
        if c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

fn map_first<F>(input: &str, f: F) -> String
where
    F: FnOnce(char) -> String,
{
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => {
            let mut result = f(first);
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

fn first_cap_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("(.)([A-Z][a-z]+)")
            .expect("valid first-cap pattern")
    })
}

fn all_cap_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("([a-z0-9])([A-Z])")
            .expect("valid all-cap pattern")
    })
}

/// Convert an identifier to snake case, e.g. `ERC20Token` to `erc20_token`.
pub fn to_snake_case(input: &str) -> String {
    let snake = first_cap_pattern().replace_all(input, "${1}_${2}");
    let snake = all_cap_pattern().replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}
