//! Pure string processing utilities (Discord-agnostic)
use crate::constants::{LINE_START_CHARS, MARKDOWN_CHARS, ZERO_WIDTH_SPACE};

/// Make a display name safe to interpolate into a message
///
/// Markdown characters are backslash-escaped and every `@` is followed by a
/// zero-width space, so `@everyone` or `<@123>` typed into a nickname renders
/// as plain text. The name always starts a message, so a leading `-` or `+`
/// is escaped too.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        if MARKDOWN_CHARS.contains(&c) || (i == 0 && LINE_START_CHARS.contains(&c)) {
            out.push('\\');
            out.push(c);
        } else if c == '@' {
            out.push(c);
            out.push(ZERO_WIDTH_SPACE);
        } else {
            out.push(c);
        }
    }
    out
}

/// Replace every occurrence of `from` with `to` in both phrases of a pair
pub fn replace_in_pair(pair: &[String; 2], from: &str, to: &str) -> [String; 2] {
    [pair[0].replace(from, to), pair[1].replace(from, to)]
}
