//! Plain-text extraction from `contenteditable` markup.

use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern is valid"));

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Turns `<br>` elements into newlines and drops every other tag.
///
/// Entities are left as they are; the server trims and stores the value.
pub fn normalize(markup: &str) -> String {
    let with_newlines = LINE_BREAK.replace_all(markup, "\n");
    TAG.replace_all(&with_newlines, "").into_owned()
}
