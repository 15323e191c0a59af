//! Minimal `{{key}}` token replacement.
//!
//! Prompt templates only use simple variable interpolation; there are no
//! conditionals or loops, so a dedicated routine replaces a full template
//! engine. Unresolved keys are left verbatim in the output.

use std::collections::HashMap;

use thiserror::Error;

/// Errors produced while scanning a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{{` opener without a matching `}}` before end of input.
    #[error("Unterminated variable token at byte offset {offset}")]
    Unterminated { offset: usize },
}

/// Renders a template by substituting `{{key}}` tokens from `variables`.
///
/// Tokens whose key has no mapping are emitted verbatim. Keys are trimmed,
/// so `{{ tone }}` and `{{tone}}` are equivalent.
///
/// # Errors
///
/// Returns [`TemplateError::Unterminated`] when a `{{` opener is never
/// closed; callers degrade to [`replace_literal`] in that case.
pub fn render(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            return Err(TemplateError::Unterminated {
                offset: offset + start,
            });
        };

        let key = after_open[..end].trim();
        match variables.get(key) {
            Some(value) => output.push_str(value),
            // Unresolved key: keep the token verbatim.
            None => output.push_str(&rest[start..start + 2 + end + 2]),
        }

        offset += start + 2 + end + 2;
        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Degraded substitution: plain search-and-replace of exact `{{key}}` tokens.
///
/// Applied against the original unsubstituted template when [`render`]
/// fails. Whitespace variants of a token are not recognized here; partial
/// replacement is acceptable, the contract is best-effort.
pub fn replace_literal(template: &str, variables: &HashMap<String, String>) -> String {
    let mut output = template.to_string();
    for (key, value) in variables {
        output = output.replace(&format!("{{{{{key}}}}}"), value);
    }
    output
}
