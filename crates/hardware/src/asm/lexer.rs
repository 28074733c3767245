//! Source line classification and tokenization.
//!
//! Both assembler passes run every line through [`classify`], so they agree on
//! which lines are blank, which are directives, and which carry an instruction.

use crate::common::error::AsmErrorKind;

/// Shape of one source line after comment stripping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or comment-only line.
    Blank,
    /// A line holding only `label:`.
    Label(&'a str),
    /// A directive (text starts with `.`), optionally labeled.
    Directive {
        /// Optional leading label.
        label: Option<&'a str>,
        /// Directive text including the leading dot.
        text: &'a str,
    },
    /// An instruction, optionally labeled.
    Instruction {
        /// Optional leading label.
        label: Option<&'a str>,
        /// Instruction text with the label removed.
        text: &'a str,
    },
}

/// Removes a trailing `#` or `;` comment and surrounding whitespace.
pub fn strip_comment(raw: &str) -> &str {
    let end = raw.find(['#', ';']).unwrap_or(raw.len());
    raw[..end].trim()
}

/// Classifies a raw source line.
///
/// # Errors
///
/// Returns `InvalidLabel` when a `name:` prefix is empty or contains `(`, `)`,
/// `,` or whitespace.
pub fn classify(raw: &str) -> Result<Line<'_>, AsmErrorKind> {
    let line = strip_comment(raw);
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if line.starts_with('.') {
        return Ok(Line::Directive {
            label: None,
            text: line,
        });
    }

    let (label, rest) = match line.split_once(':') {
        Some((name, rest)) => (Some(validate_label(name.trim())?), rest.trim()),
        None => (None, line),
    };

    Ok(match (label, rest) {
        (Some(name), "") => Line::Label(name),
        (_, text) if text.starts_with('.') => Line::Directive { label, text },
        (_, text) => Line::Instruction { label, text },
    })
}

fn validate_label(name: &str) -> Result<&str, AsmErrorKind> {
    if name.is_empty() {
        return Err(AsmErrorKind::InvalidLabel {
            label: name.to_string(),
            reason: "label name is empty",
        });
    }
    if name
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ','))
    {
        return Err(AsmErrorKind::InvalidLabel {
            label: name.to_string(),
            reason: "labels must not contain '(', ')', ',' or whitespace",
        });
    }
    Ok(name)
}

/// Splits instruction text into a mnemonic and operand tokens.
///
/// Operands are separated by commas, spaces or tabs. A token wrapped entirely in
/// parentheses, such as `(x5)`, is unwrapped.
pub fn tokenize(text: &str) -> (&str, Vec<&str>) {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let mnemonic = parts.next().unwrap_or_default();
    let operands = parts
        .map(|t| {
            t.strip_prefix('(')
                .and_then(|inner| inner.strip_suffix(')'))
                .unwrap_or(t)
        })
        .collect();
    (mnemonic, operands)
}
