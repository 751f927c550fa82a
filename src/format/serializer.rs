//! Serializer
//!
//! Renders a store into the canonical text layout. Sections come out in
//! name order and variables in key order, so output is deterministic.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::section::{RootSection, Section};
use crate::store::Store;

/// Render the whole store to a string
pub fn render(store: &Store, config: &Config) -> String {
    let mut out = String::new();
    for root in store.roots() {
        append_root(&mut out, root, config);
    }
    out
}

/// Render the store into a writer
pub fn write_store<W: Write>(writer: &mut W, store: &Store, config: &Config) -> Result<()> {
    writer.write_all(render(store, config).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Root header only when the root has variables of its own
fn append_root(out: &mut String, root: &RootSection, config: &Config) {
    if !root.section().is_empty() {
        out.push_str(&format!("[{}]\n", root.name()));
    }
    append_variables(out, root.section(), config);

    let quote = config.subsection_quote;
    for sub in root.subsections() {
        out.push_str(&format!("[{} {quote}{}{quote}]\n", root.name(), sub.name()));
        append_variables(out, sub, config);
    }
}

fn append_variables(out: &mut String, section: &Section, config: &Config) {
    for (key, value) in section.variables() {
        out.push_str(&format!("{}{key} = {value}\n", config.indent));
    }
    if !section.is_empty() {
        out.push('\n');
    }
}
