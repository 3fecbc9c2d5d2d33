//! Display formatting for inferred segments

/// Converts a raw path or title segment into a display name
///
/// Hyphens and underscores become spaces, a trailing `.html` is dropped,
/// and the result is title-cased. Version tokens such as `v2` are
/// upper-cased as a whole.
///
/// # Example
///
/// ```
/// use doc_module_extractor::inference::format_segment;
///
/// assert_eq!(format_segment("getting-started"), "Getting Started");
/// assert_eq!(format_segment("API Reference"), "Api Reference");
/// assert_eq!(format_segment("v2"), "V2");
/// ```
pub fn format_segment(segment: &str) -> String {
    let spaced = segment.replace(&['-', '_'][..], " ");
    let stem = spaced.strip_suffix(".html").unwrap_or(&spaced);

    if is_version_token(stem) {
        return stem.to_uppercase();
    }
    title_case(stem)
}

/// `v` followed by one or more ASCII digits, any case
fn is_version_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some('v' | 'V'))
        && !chars.as_str().is_empty()
        && chars.all(|c| c.is_ascii_digit())
}

/// Upper-cases each letter that follows a non-letter and lower-cases the rest
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}
