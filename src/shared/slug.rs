//! Name → URL slug conversion shared by categories and brands.
//!
//! Cyrillic letters are transliterated through a fixed table, accented
//! Latin letters lose their diacritics through NFKD, everything outside
//! `[a-z0-9]` collapses into single hyphens, and the result never starts
//! or ends with a hyphen. The same function backs the live preview
//! and the value sent on save, so both always agree.

use unicode_normalization::UnicodeNormalization;

/// Latin rendering of a lower-case Cyrillic letter, `None` for anything else.
fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Combining diacritical marks left over after NFKD decomposition
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Derive a URL-safe slug from an operator-entered name.
///
/// Total and deterministic: degenerate input yields an empty or short slug,
/// which callers reject with their own minimum-length rule.
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    let mut push = |c: char, slug: &mut String| {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    };

    let mut transliterated = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        match transliterate(ch) {
            Some(latin) => transliterated.push_str(latin),
            None => transliterated.push(ch),
        }
    }

    transliterated
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .for_each(|c| push(c, &mut slug));

    slug
}
