//! Key Resolver
//!
//! Decomposes dotted addresses into their structural parts.
//!
//! ## Address Forms
//! ```text
//! variable:  root.key            root-level variable
//!            root.sub.key        sub-section variable
//! section:   root                root section
//!            root.sub            sub-section
//! ```
//!
//! Composed keys split on at most two dots. Everything after the second dot
//! is the local key verbatim, so `a.b.c.d` addresses key `c.d` in
//! sub-section `a.b`. Empty segments are rejected.
//!
//! ## Writability
//! Reads accept any well-formed address. Writes also require that every part
//! survives a render/parse cycle unchanged:
//! - root names: no whitespace, `.`, brackets, or quotes
//! - sub-section names: no `.`, brackets, quotes, line breaks, or outer whitespace
//! - keys: no `=`, line breaks, or outer whitespace; no leading `[`, `#`, `;`
//! - values: no line breaks or outer whitespace

use crate::error::{ConfigError, Result};

/// Separator between address segments
pub const SEPARATOR: char = '.';

/// A composed key decomposed into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposedKey<'a> {
    pub root: &'a str,
    pub sub: Option<&'a str>,
    pub key: &'a str,
}

impl<'a> ComposedKey<'a> {
    /// Split `root.key` or `root.sub.key`
    pub fn parse(composed: &'a str) -> Result<Self> {
        let mut parts = composed.splitn(3, SEPARATOR);
        let first = parts.next().unwrap_or_default();
        let (second, third) = match (parts.next(), parts.next()) {
            (Some(second), third) => (second, third),
            (None, _) => return Err(ConfigError::InvalidKey(composed.to_string())),
        };

        let parsed = match third {
            Some(key) => Self { root: first, sub: Some(second), key },
            None => Self { root: first, sub: None, key: second },
        };

        if parsed.root.is_empty()
            || parsed.key.is_empty()
            || parsed.sub.is_some_and(str::is_empty)
        {
            return Err(ConfigError::InvalidKey(composed.to_string()));
        }

        Ok(parsed)
    }

    /// Check every part can be rendered and parsed back unchanged
    pub fn ensure_writable(&self) -> Result<()> {
        let valid = is_root_name(self.root)
            && self.sub.map_or(true, is_subsection_name)
            && is_variable_key(self.key, self.sub.is_none());
        if !valid {
            return Err(ConfigError::InvalidKey(compose(self.root, self.sub, self.key)));
        }
        Ok(())
    }

    /// The section this key lives in
    pub fn section(&self) -> SectionPath<'a> {
        SectionPath {
            root: self.root,
            sub: self.sub,
        }
    }
}

/// A section address: `root` or `root.sub`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPath<'a> {
    pub root: &'a str,
    pub sub: Option<&'a str>,
}

impl<'a> SectionPath<'a> {
    /// Split a section name on its first dot
    pub fn parse(name: &'a str) -> Result<Self> {
        let path = match name.split_once(SEPARATOR) {
            Some((root, sub)) => Self { root, sub: Some(sub) },
            None => Self { root: name, sub: None },
        };

        if path.root.is_empty() || path.sub.is_some_and(|s| s.is_empty() || s.contains(SEPARATOR)) {
            return Err(ConfigError::InvalidKey(name.to_string()));
        }

        Ok(path)
    }

    /// Check the names can be rendered in a header and parsed back unchanged
    pub fn ensure_writable(&self) -> Result<()> {
        if !is_root_name(self.root) || !self.sub.map_or(true, is_subsection_name) {
            return Err(ConfigError::InvalidKey(match self.sub {
                Some(sub) => format!("{}.{sub}", self.root),
                None => self.root.to_string(),
            }));
        }
        Ok(())
    }

    /// Address a variable inside this section
    ///
    /// Root-level keys must not contain a dot, otherwise the composed form
    /// would resolve to a sub-section instead.
    pub fn with_key(self, key: &'a str) -> Result<ComposedKey<'a>> {
        let invalid = key.is_empty() || (self.sub.is_none() && key.contains(SEPARATOR));
        if invalid {
            return Err(ConfigError::InvalidKey(compose(self.root, self.sub, key)));
        }
        Ok(ComposedKey {
            root: self.root,
            sub: self.sub,
            key,
        })
    }
}

// =============================================================================
// Writability Checks
// =============================================================================

fn is_header_char(c: char) -> bool {
    c == SEPARATOR || c == '[' || c == ']' || c == '\'' || c == '"'
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// A name usable as `[root]`
pub fn is_root_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| is_header_char(c) || c.is_whitespace())
}

/// A name usable as `[root 'sub']`
pub fn is_subsection_name(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.contains(|c: char| is_header_char(c) || is_line_break(c))
}

/// A key usable on a `key = value` line
///
/// Root-level keys additionally may not contain a dot.
pub fn is_variable_key(key: &str, root_level: bool) -> bool {
    !key.is_empty()
        && key.trim() == key
        && !key.starts_with(['[', '#', ';'])
        && !key.contains(|c: char| c == '=' || is_line_break(c) || (root_level && c == SEPARATOR))
}

/// Reject values the parser would trim or split across lines
pub fn validate_value(key: &str, value: &str) -> Result<()> {
    if value.trim() != value || value.contains(is_line_break) {
        return Err(ConfigError::InvalidValue(key.to_string()));
    }
    Ok(())
}

/// Check a single name carries no separator
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(ConfigError::InvalidKey(name.to_string()));
    }
    Ok(())
}

/// Join address parts back into a composed key
pub fn compose(root: &str, sub: Option<&str>, key: &str) -> String {
    match sub {
        Some(sub) => format!("{root}.{sub}.{key}"),
        None => format!("{root}.{key}"),
    }
}
