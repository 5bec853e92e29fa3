use std::collections::HashMap;

/// Substitute `{{ name }}` placeholders from a flat variable map.
///
/// Whitespace around the name is tolerated. A placeholder whose name is not
/// in the map renders as the empty string rather than leaking the raw token
/// into customer email. Substituted values are never re-scanned, so a value
/// containing `{{...}}` passes through literally.
pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                if let Some(value) = vars.get(name) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                // unterminated token: keep the tail as-is
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
