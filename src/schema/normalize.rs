use std::sync::LazyLock;

use regex::Regex;

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[.*?\]").expect("bracket pattern is a valid regex")
});

/// Reduces a raw header to its lookup key.
///
/// Bracketed annotations go first (non-greedy, so `A [x] B [y]` keeps `B`), then all
/// whitespace, then `.` and `_`. The result is a fixed point: normalizing it again is a no-op.
pub fn normalize(raw_header: &str) -> String {
    BRACKETED.replace_all(raw_header, "")
        .chars()
        .filter(|character| !character.is_whitespace() && *character != '.' && *character != '_')
        .collect()
}
