//! Locale-aware ordering of category names.
//!
//! Approximates root-locale collation without an ICU dependency:
//! separators and punctuation sort before digits, digits before letters,
//! letters compare case-insensitively with `ё` folded onto `е`. Names that
//! are equal at that level order lowercase-first, then by code point, so the
//! result is a total order.

use std::cmp::Ordering;

/// Collation class of a character at the primary level
fn class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn fold(c: char) -> char {
    match c {
        'ё' | 'Ё' => 'е',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

fn primary_key(name: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    name.chars().map(|c| (class(c), fold(c)))
}

/// Lowercase sorts before uppercase when names are otherwise equal
fn case_key(name: &str) -> impl Iterator<Item = u8> + '_ {
    name.chars().map(|c| u8::from(c.is_uppercase()))
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}
