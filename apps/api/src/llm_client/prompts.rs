// Shared prompt fragments.
// Each component that calls the text model keeps its own templates in
// generation/prompts.rs; fragments used by more than one template live here.

/// Appended to prompts whose reply must be a single JSON object.
pub const JSON_OBJECT_INSTRUCTION: &str = "Respond with the JSON object only.";

/// Appended to prompts whose reply is published verbatim.
pub const POST_ONLY_INSTRUCTION: &str = "Return ONLY the post content, no extra text.";

/// Fills `{key}` placeholders in one pass over `template`.
///
/// Inserted values are copied verbatim and never rescanned, so a value that
/// itself contains `{key}` text is left as written. Braces that do not form a
/// known placeholder (JSON examples, for instance) pass through unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let placeholder = values.iter().find(|(key, _)| {
            tail[1..]
                .strip_prefix(*key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match placeholder {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
