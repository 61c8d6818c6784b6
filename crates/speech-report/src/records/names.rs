//! Helpers for politician names as they appear across exports.
//!
//! Parliamentary listings write names surname-first ("Reczek Tomasz") while
//! transcripts use the given name first, so lookups occasionally need to try
//! both orders.

const SURNAME_EXCEPTIONS: [(&str, &str); 1] =
    [("Szynkowski vel Sęk Szymon", "Szymon Szynkowski vel Sęk")];

/// Moves the leading surname token to the end of the name.
///
/// Multi-token surnames that cannot be detected from the text alone are
/// covered by a fixed exception table, which maps in both directions.
pub fn swap_name_with_surname(full_name: &str) -> String {
    for (surname_first, given_first) in SURNAME_EXCEPTIONS {
        if full_name == surname_first {
            return given_first.to_string();
        }
        if full_name == given_first {
            return surname_first.to_string();
        }
    }

    let mut parts = full_name.split_whitespace();
    let Some(surname) = parts.next() else {
        return String::new();
    };

    let rest = parts.collect::<Vec<_>>();
    if rest.is_empty() {
        return surname.to_string();
    }

    format!("{} {}", rest.join(" "), surname)
}

/// Strips invisible characters and collapses runs of whitespace.
pub fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
