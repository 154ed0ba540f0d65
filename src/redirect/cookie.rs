//! Cookie-jar reads with browser `document.cookie` semantics.

/// Read a cookie value from a raw cookie jar string.
///
/// Entries are split on `;` with leading spaces stripped; the first
/// entry prefixed with `name=` wins and later duplicates are not
/// consulted. An empty value counts as absent.
pub fn read_cookie<'a>(jar: &'a str, name: &str) -> Option<&'a str> {
    for part in jar.split(';') {
        let part = part.trim_start_matches(' ');

        let Some(value) = part.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) else {
            continue;
        };

        if value.is_empty() {
            return None;
        }
        return Some(value);
    }

    None
}
