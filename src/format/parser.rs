//! Parser
//!
//! Line-oriented state machine that populates a store from text.
//!
//! ```text
//!            header                  blank line
//! Awaiting ──────────► Reading ─────────────────► Awaiting
//! Section              Variables ◄──┐             Section
//!                          │        │ key = value
//!                          └────────┘
//!                      header: switch section, stay in Reading
//! ```

use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::key::{is_root_name, is_subsection_name, is_variable_key};
use crate::store::Store;

/// A parsed section header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub root: &'a str,
    pub sub: Option<&'a str>,
}

/// Parser state
#[derive(Debug, Clone, Copy)]
enum State<'a> {
    AwaitingSection,
    ReadingVariables(Header<'a>),
}

/// Parse `text` into `store`
///
/// Additive: sections not mentioned in the text are left alone and
/// re-declared keys overwrite what the store held. On error the store may
/// hold the lines read so far; `Store::merge_str` parses into a scratch store
/// first to keep the target untouched.
pub fn parse_into(store: &mut Store, text: &str, config: &Config) -> Result<()> {
    let mut state = State::AwaitingSection;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            state = State::AwaitingSection;
            continue;
        }

        if config.allow_comments && (line.starts_with('#') || line.starts_with(';')) {
            continue;
        }

        if line.starts_with('[') {
            let header = parse_header(line).ok_or_else(|| unreadable_section(line_no, raw))?;
            debug!(root = header.root, sub = ?header.sub, line = line_no, "Reading section");
            store.touch_section(header.root, header.sub);
            state = State::ReadingVariables(header);
            continue;
        }

        match state {
            State::AwaitingSection => return Err(unreadable_section(line_no, raw)),
            State::ReadingVariables(header) => {
                let (key, value) = parse_variable(line, header)
                    .ok_or_else(|| ConfigError::UnreadableVariable {
                        line: line_no,
                        content: raw.to_string(),
                    })?;
                debug!(root = header.root, sub = ?header.sub, key, "Reading variable");
                store.put(header.root, header.sub, key, value);
            }
        }
    }

    Ok(())
}

/// Tokenize a header line such as `[merge 'tool']`
///
/// Returns `None` for anything that is not a well-formed header.
pub fn parse_header(line: &str) -> Option<Header<'_>> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();

    let name_end = inner
        .find(|c: char| c.is_whitespace() || c == '\'' || c == '"')
        .unwrap_or(inner.len());
    let (root, rest) = inner.split_at(name_end);
    if !is_root_name(root) {
        return None;
    }

    let rest = rest.trim();
    if rest.is_empty() {
        return Some(Header { root, sub: None });
    }

    let sub = match rest.chars().next() {
        Some(quote @ ('\'' | '"')) => {
            let body = &rest[1..];
            let close = body.find(quote)?;
            if close + 1 != body.len() {
                return None;
            }
            body[..close].trim()
        }
        _ if rest.contains(char::is_whitespace) => return None,
        _ => rest,
    };

    is_subsection_name(sub).then_some(Header { root, sub: Some(sub) })
}

/// Split `key = value` on the first `=`
fn parse_variable<'a>(line: &'a str, header: Header<'_>) -> Option<(&'a str, &'a str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    is_variable_key(key, header.sub.is_none()).then_some((key, value.trim()))
}

fn unreadable_section(line: usize, content: &str) -> ConfigError {
    ConfigError::UnreadableSection {
        line,
        content: content.to_string(),
    }
}
