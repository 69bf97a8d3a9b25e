//! Template rendering — `{{ name }}` substitution with HTML escaping.
//!
//! Pure variable interpolation: no control flow, no loops, no filters.
//! Every substituted value is HTML-escaped before insertion. The same code
//! path renders subjects too; subjects never contain markup-significant
//! characters in practice, and one escaping path beats two.

use std::collections::BTreeMap;

use crate::error::RenderError;

/// Per-row variable bindings, built fresh for each row and discarded after
/// its bodies are rendered.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    vars: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Escape a value for safe embedding in HTML.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Substitute `{{ name }}` placeholders from the context into a template.
///
/// Whitespace around the name is tolerated. Referencing a name absent from
/// the context is a [`RenderError::UndefinedVariable`]; a `{{` without a
/// matching `}}` is a [`RenderError::UnclosedPlaceholder`].
pub fn render(template: &str, ctx: &RenderContext) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(RenderError::UnclosedPlaceholder {
                position: template.len() - rest.len() + start,
            });
        };
        let name = after[..end].trim();
        let value = ctx.get(name).ok_or_else(|| RenderError::UndefinedVariable {
            name: name.to_string(),
        })?;
        out.push_str(&escape_html(value));
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

// ── Tests ───────────────────────────────────────────────────────────
