//! Literal encoding for generated source.

/// A JavaScript string literal. `<` is escaped so the literal is safe inside `<script>`.
pub(crate) fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string().replace('<', "\\u003c")
}

/// A JavaScript array of string literals.
pub(crate) fn js_string_array(items: &[String]) -> String {
    let parts: Vec<String> = items.iter().map(|s| js_string(s)).collect();
    format!("[{}]", parts.join(", "))
}

/// A JavaScript array of numbers, printed in shortest round-trip form (`50`, `33.3333`).
pub(crate) fn js_number_array(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// JSON for a data attribute; same as the JS forms without spacing.
pub(crate) fn json_number_array(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(","))
}

pub(crate) fn json_string_array(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}

/// Escape an HTML attribute value for the given quote character.
pub(crate) fn escape_attr(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' if quote == '"' => out.push_str("&quot;"),
            '\'' if quote == '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Substitute `__KEY__` placeholders in a template in a single pass; substituted values are
/// never rescanned.
pub(crate) fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find("__") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let hit = vars.iter().find(|(key, _)| {
            tail[2..]
                .strip_prefix(key)
                .is_some_and(|t| t.starts_with("__"))
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 4..];
            }
            None => {
                out.push_str("__");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/emit/js.rs"]
mod tests;
