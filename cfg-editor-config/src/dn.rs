//! LDAP distinguished-name parsing for DN-flagged settings.
//!
//! Only the structure is checked: comma-separated `attribute=value`
//! components with backslash escapes. Values are kept in their escaped
//! form so formatting a parsed DN reproduces an equivalent string.

use std::fmt;
use thiserror::Error;

/// Errors produced while parsing a distinguished name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnError {
    #[error("distinguished name is empty")]
    Empty,
    #[error("component {position} (\"{component}\") has no '='")]
    MissingEquals { position: usize, component: String },
    #[error("component {position} has an empty or invalid attribute name")]
    InvalidAttribute { position: usize },
    #[error("component {position} has an empty value")]
    EmptyValue { position: usize },
    #[error("distinguished name ends with a dangling escape")]
    TrailingEscape,
}

/// One relative distinguished name, e.g. `ou=People`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rdn {
    pub attribute: String,
    pub value: String,
}

impl fmt::Display for Rdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.attribute, self.value)
    }
}

/// A parsed distinguished name, most specific component first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishedName {
    rdns: Vec<Rdn>,
}

impl DistinguishedName {
    pub fn parse(input: &str) -> Result<Self, DnError> {
        let trimmed = trim_component(input);
        if trimmed.is_empty() {
            return Err(DnError::Empty);
        }

        let components = split_unescaped(trimmed, ',')?;
        let mut rdns = Vec::with_capacity(components.len());
        for (position, component) in components.into_iter().enumerate() {
            let Some(eq) = find_unescaped(&component, '=') else {
                return Err(DnError::MissingEquals {
                    position,
                    component: component.trim().to_string(),
                });
            };
            let attribute = component[..eq].trim();
            let value = trim_component(&component[eq + 1..]);
            if !is_valid_attribute(attribute) {
                return Err(DnError::InvalidAttribute { position });
            }
            if value.is_empty() {
                return Err(DnError::EmptyValue { position });
            }
            rdns.push(Rdn {
                attribute: attribute.to_string(),
                value: value.to_string(),
            });
        }

        Ok(Self { rdns })
    }

    pub fn rdns(&self) -> &[Rdn] {
        &self.rdns
    }

    /// Number of components
    pub fn depth(&self) -> usize {
        self.rdns.len()
    }

}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rdn) in self.rdns.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{rdn}")?;
        }
        Ok(())
    }
}

fn is_valid_attribute(attribute: &str) -> bool {
    !attribute.is_empty()
        && attribute
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

/// Trim surrounding whitespace, keeping a trailing space that is escaped.
fn trim_component(input: &str) -> &str {
    let input = input.trim_start();
    let trimmed = input.trim_end();
    let backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
    if backslashes % 2 == 0 {
        return trimmed;
    }
    let escaped = input[trimmed.len()..]
        .chars()
        .next()
        .map_or(0, char::len_utf8);
    &input[..trimmed.len() + escaped]
}

/// Split on `sep` wherever it is not preceded by a backslash escape.
fn split_unescaped(input: &str, sep: char) -> Result<Vec<String>, DnError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let next = chars.next().ok_or(DnError::TrailingEscape)?;
                current.push('\\');
                current.push(next);
            }
            c if c == sep => parts.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    parts.push(current);
    Ok(parts)
}

/// Byte offset of the first unescaped `target`.
fn find_unescaped(input: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (offset, c) in input.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == target {
            return Some(offset);
        }
    }
    None
}
