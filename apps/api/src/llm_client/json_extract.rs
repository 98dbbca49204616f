//! Locates a JSON object inside free-form model output.
//!
//! Models often wrap JSON in prose or markdown fences. The scanner starts at
//! the first `{` and walks forward tracking brace depth, ignoring braces that
//! appear inside string literals (with `\` escapes). The first span that
//! returns to depth zero is the candidate object; decoding it is the caller's
//! job.

/// Returns the first balanced `{...}` span in `text`, or `None` if the first
/// opening brace is never closed.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
