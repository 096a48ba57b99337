use unicode_normalization::UnicodeNormalization;

/// ASCII whitespace, including the vertical tab and the information separators
/// `\x1c`..=`\x1f`
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Converts text into a URL-safe slug
///
/// Accented letters are folded to ASCII, anything that is not a letter, digit,
/// underscore, hyphen or whitespace is dropped, and runs of hyphens and
/// whitespace collapse into a single hyphen.
///
/// # Arguments
/// * `value` - The text to convert
///
/// # Returns
/// * A lowercase slug with no leading or trailing `-` or `_`
pub fn slugify(value: &str) -> String {
    let kept: String = value
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-') || is_space(*c))
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.chars() {
        if c == '-' || is_space(c) {
            if !in_separator {
                slug.push('-');
            }
            in_separator = true;
        } else {
            slug.push(c);
            in_separator = false;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}
