//! Char-offset helpers
//!
//! Core offsets count Unicode scalar values. Browsers report selection
//! offsets in UTF-16 code units, so the DOM layer converts at the boundary.

/// Byte index of the `char_idx`-th char (clamped to the end)
pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Split `text` at a char offset
pub fn split_at_char(text: &str, char_idx: usize) -> (String, String) {
    let byte = char_to_byte_idx(text, char_idx);
    (text[..byte].to_string(), text[byte..].to_string())
}

/// Convert a UTF-16 code unit offset into a char offset
///
/// An offset that lands inside a surrogate pair rounds down to the char start.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (chars, ch) in text.chars().enumerate() {
        let width = ch.len_utf16();
        if units + width > utf16_offset {
            return chars;
        }
        units += width;
    }
    text.chars().count()
}

/// Convert a char offset into a UTF-16 code unit offset
pub fn char_to_utf16_offset(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(char::len_utf16).sum()
}
