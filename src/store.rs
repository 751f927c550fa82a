//! Store Module
//!
//! The aggregate every public operation goes through.
//!
//! ## Responsibilities
//! - Own all root sections (and through them, sub-sections and variables)
//! - Dispatch composed keys and explicit section/key forms to the model
//! - Keep the two-level invariant across rename and removal
//! - Load from and save to text via the format module
//!
//! ## Not-found Handling
//! Missing roots, sub-sections, or keys never raise: `get` returns `""`,
//! removals and renames do nothing.
//!
//! ## Concurrency
//! Not thread-safe on its own. Mutation takes `&mut self`; callers sharing a
//! store across threads wrap it, e.g. in `SharedStore`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::{ConfigError, Result};
use crate::format;
use crate::key::{compose, validate_name, validate_value, ComposedKey, SectionPath};
use crate::section::{RootSection, Section};

/// In-memory configuration store
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Text format settings
    config: Config,

    /// Root sections by name
    roots: BTreeMap<String, RootSection>,
}

impl Store {
    /// Create an empty store with the default text format
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a custom text format
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            roots: BTreeMap::new(),
        }
    }

    /// Parse text into a new store
    pub fn parse(text: &str) -> Result<Self> {
        let mut store = Self::new();
        store.merge_str(text)?;
        Ok(store)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a value by composed key (`root.key` or `root.sub.key`)
    ///
    /// Returns `""` when any part of the path is missing.
    pub fn get(&self, key: &str) -> Result<String> {
        let key = ComposedKey::parse(key)?;
        Ok(self.lookup(key).unwrap_or_default().to_string())
    }

    /// Get a value from a section given as `root` or `root.sub`
    pub fn get_in(&self, section: &str, key: &str) -> Result<String> {
        let key = SectionPath::parse(section)?.with_key(key)?;
        Ok(self.lookup(key).unwrap_or_default().to_string())
    }

    /// Get a value from a sub-section
    pub fn get_sub(&self, root: &str, sub: &str, key: &str) -> String {
        self.lookup(ComposedKey {
            root,
            sub: Some(sub),
            key,
        })
        .unwrap_or_default()
        .to_string()
    }

    /// True iff the key resolves to a non-empty value
    ///
    /// Malformed keys are simply not contained.
    pub fn contains_variable(&self, key: &str) -> bool {
        ComposedKey::parse(key)
            .ok()
            .and_then(|key| self.lookup(key))
            .is_some_and(|value| !value.is_empty())
    }

    fn lookup(&self, key: ComposedKey<'_>) -> Option<&str> {
        let root = self.roots.get(key.root)?;
        match key.sub {
            Some(sub) => root.subsection(sub)?.variable(key.key),
            None => root.section().variable(key.key),
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Set a value by composed key, creating sections on first reference
    ///
    /// Only addresses and values that survive a save/load cycle unchanged are
    /// accepted. Names with quotes or brackets, keys with `=` or a leading
    /// comment marker, and any part with a line break fail with `InvalidKey`.
    /// A value with a line break or leading/trailing whitespace fails with
    /// `InvalidValue`. The store is left unchanged on error.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let key = ComposedKey::parse(key)?;
        self.write(key, value.into())
    }

    /// Set a possibly absent value
    ///
    /// An absent value fails with `NullValue`; the store is left unchanged.
    pub fn try_set(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        let parsed = ComposedKey::parse(key)?;
        parsed.ensure_writable()?;
        match value {
            Some(value) => self.write(parsed, value.to_string()),
            None => Err(ConfigError::NullValue(key.to_string())),
        }
    }

    /// Set a value in a section given as `root` or `root.sub`
    pub fn set_in(&mut self, section: &str, key: &str, value: impl Into<String>) -> Result<()> {
        let key = SectionPath::parse(section)?.with_key(key)?;
        self.write(key, value.into())
    }

    /// Set a value in a sub-section
    pub fn set_sub(
        &mut self,
        root: &str,
        sub: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let key = ComposedKey {
            root,
            sub: Some(sub),
            key,
        };
        self.write(key, value.into())
    }

    fn write(&mut self, key: ComposedKey<'_>, value: String) -> Result<()> {
        key.ensure_writable()?;
        validate_value(&compose(key.root, key.sub, key.key), &value)?;
        self.put(key.root, key.sub, key.key, value);
        Ok(())
    }

    /// Insert without validation (callers have resolved the address)
    pub(crate) fn put(&mut self, root: &str, sub: Option<&str>, key: &str, value: impl Into<String>) {
        self.touch_section(root, sub).set_variable(key, value);
    }

    /// Get or create the addressed section
    pub(crate) fn touch_section(&mut self, root: &str, sub: Option<&str>) -> &mut Section {
        let root = self
            .roots
            .entry(root.to_string())
            .or_insert_with(|| RootSection::new(root));
        match sub {
            Some(sub) => root.subsection_or_create(sub),
            None => root.section_mut(),
        }
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove a variable by composed key
    pub fn remove(&mut self, key: &str) -> Result<()> {
        let key = ComposedKey::parse(key)?;
        self.delete(key);
        Ok(())
    }

    /// Remove a variable from a section given as `root` or `root.sub`
    pub fn remove_in(&mut self, section: &str, key: &str) -> Result<()> {
        let key = SectionPath::parse(section)?.with_key(key)?;
        self.delete(key);
        Ok(())
    }

    /// Remove a variable from a sub-section
    pub fn remove_sub(&mut self, root: &str, sub: &str, key: &str) {
        self.delete(ComposedKey {
            root,
            sub: Some(sub),
            key,
        });
    }

    fn delete(&mut self, key: ComposedKey<'_>) -> Option<String> {
        let root = self.roots.get_mut(key.root)?;
        match key.sub {
            Some(sub) => root.subsection_mut(sub)?.remove_variable(key.key),
            None => root.section_mut().remove_variable(key.key),
        }
    }

    /// Remove a whole section given as `root` or `root.sub`
    pub fn remove_section(&mut self, name: &str) -> Result<()> {
        let path = SectionPath::parse(name)?;
        match path.sub {
            Some(sub) => self.remove_subsection(path.root, sub),
            None => {
                if self.roots.remove(path.root).is_some() {
                    info!(section = path.root, "Removed section");
                }
            }
        }
        Ok(())
    }

    /// Remove a sub-section
    pub fn remove_subsection(&mut self, root: &str, sub: &str) {
        let removed = self
            .roots
            .get_mut(root)
            .and_then(|r| r.remove_subsection(sub));
        if removed.is_some() {
            info!(section = root, sub, "Removed sub-section");
        }
    }

    /// Remove every section
    pub fn clear(&mut self) {
        self.roots.clear();
    }

    // =========================================================================
    // Rename
    // =========================================================================

    /// Rename a section, keeping its variables
    ///
    /// `old` is `root` or `root.sub`. A dotted `new` moves the section under
    /// another root: `rename_section("source", "project.config")` turns root
    /// `source` into sub-section `config` of `project`. A root that has
    /// sub-sections holding variables cannot become a sub-section
    /// (`NestedSubsection`); empty sub-sections are dropped by the move.
    /// Moving onto an existing section merges, with the moved variables
    /// winning. A target name that could not be saved fails with `InvalidKey`.
    pub fn rename_section(&mut self, old: &str, new: &str) -> Result<()> {
        let from = SectionPath::parse(old)?;
        let to = match from.sub {
            Some(_) if !new.contains('.') => SectionPath {
                root: from.root,
                sub: Some(new),
            },
            _ => SectionPath::parse(new)?,
        };
        to.ensure_writable()?;

        if from == to {
            return Ok(());
        }

        match (from.sub, to.sub) {
            (None, None) => {
                let Some(mut moved) = self.roots.remove(from.root) else {
                    return Ok(());
                };
                moved.set_name(to.root);
                match self.roots.get_mut(to.root) {
                    Some(existing) => existing.absorb(moved),
                    None => {
                        self.roots.insert(to.root.to_string(), moved);
                    }
                }
            }
            (None, Some(target_sub)) => {
                match self.roots.get(from.root) {
                    None => return Ok(()),
                    Some(root) if root.subsections().any(|s| !s.is_empty()) => {
                        return Err(ConfigError::NestedSubsection {
                            section: old.to_string(),
                            target: new.to_string(),
                        });
                    }
                    Some(_) => {}
                }
                let Some(moved) = self.roots.remove(from.root) else {
                    return Ok(());
                };
                let (mut section, _) = moved.into_parts();
                section.set_name(target_sub);
                self.root_or_create(to.root).insert_subsection(section);
            }
            (Some(from_sub), target_sub) => {
                let Some(mut section) = self
                    .roots
                    .get_mut(from.root)
                    .and_then(|r| r.remove_subsection(from_sub))
                else {
                    return Ok(());
                };
                section.set_name(target_sub.unwrap_or(new));
                self.root_or_create(to.root).insert_subsection(section);
            }
        }

        info!(from = old, to = new, "Renamed section");
        Ok(())
    }

    /// Rename a sub-section within its root
    pub fn rename_subsection(&mut self, root: &str, old_sub: &str, new_sub: &str) -> Result<()> {
        validate_name(root)?;
        validate_name(old_sub)?;
        validate_name(new_sub)?;
        self.rename_section(&format!("{root}.{old_sub}"), new_sub)
    }

    fn root_or_create(&mut self, name: &str) -> &mut RootSection {
        self.roots
            .entry(name.to_string())
            .or_insert_with(|| RootSection::new(name))
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Every composed key in the store
    pub fn key_set(&self) -> BTreeSet<String> {
        self.composed_variables().map(|(k, _)| k).collect()
    }

    /// Every value, ordered by composed key; duplicates are kept
    pub fn values(&self) -> Vec<String> {
        self.composed_variables().map(|(_, v)| v.to_string()).collect()
    }

    /// Values under a prefix given as `root` or `root.sub`
    pub fn values_in(&self, prefix: &str) -> Vec<String> {
        self.filtered(prefix).map(|(_, v)| v.to_string()).collect()
    }

    /// Snapshot of every variable, keyed by composed key
    pub fn variables(&self) -> BTreeMap<String, String> {
        self.composed_variables()
            .map(|(k, v)| (k, v.to_string()))
            .collect()
    }

    /// Variables under a prefix given as `root` or `root.sub`
    ///
    /// A root prefix includes the entries of its sub-sections. An unknown or
    /// malformed prefix yields an empty map.
    pub fn variables_in(&self, prefix: &str) -> BTreeMap<String, String> {
        self.filtered(prefix).map(|(k, v)| (k, v.to_string())).collect()
    }

    fn composed_variables(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.roots.values().flat_map(|root| root.composed_variables())
    }

    fn filtered<'a>(&'a self, prefix: &str) -> Box<dyn Iterator<Item = (String, &'a str)> + 'a> {
        let Ok(path) = SectionPath::parse(prefix) else {
            return Box::new(std::iter::empty());
        };
        let Some(root) = self.roots.get(path.root) else {
            return Box::new(std::iter::empty());
        };
        match path.sub {
            None => Box::new(root.composed_variables()),
            Some(sub) => {
                let Some(section) = root.subsection(sub) else {
                    return Box::new(std::iter::empty());
                };
                let (root, sub) = (root.name(), section.name());
                Box::new(
                    section
                        .variables()
                        .iter()
                        .map(move |(k, v)| (compose(root, Some(sub), k), v.as_str())),
                )
            }
        }
    }

    /// True when no variable exists anywhere in the store
    pub fn is_empty(&self) -> bool {
        self.roots.values().all(RootSection::is_empty)
    }

    /// Number of root sections, including ones without variables
    pub fn section_count(&self) -> usize {
        self.roots.len()
    }

    /// Root sections in name order
    pub fn roots(&self) -> impl Iterator<Item = &RootSection> {
        self.roots.values()
    }

    /// Look up a root section
    pub fn root(&self, name: &str) -> Option<&RootSection> {
        self.roots.get(name)
    }

    /// Read-only iterator over a snapshot of every variable
    pub fn iter(&self) -> std::collections::btree_map::IntoIter<String, String> {
        self.variables().into_iter()
    }

    /// Cursor over a snapshot of the key set that can delete as it goes
    pub fn cursor(&mut self) -> Cursor<'_> {
        Cursor::new(self)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Text and I/O
    // =========================================================================

    /// Render the store in the canonical text layout
    pub fn text_content(&self) -> String {
        format::render(self, &self.config)
    }

    /// Merge parsed text into the store
    ///
    /// Unrelated sections survive; keys present in both are overwritten.
    /// On a parse error the store is unchanged.
    pub fn merge_str(&mut self, text: &str) -> Result<()> {
        let mut scratch = Store::with_config(self.config.clone());
        format::parse_into(&mut scratch, text, &self.config)?;
        for (name, root) in scratch.roots {
            match self.roots.get_mut(&name) {
                Some(existing) => existing.absorb(root),
                None => {
                    self.roots.insert(name, root);
                }
            }
        }
        Ok(())
    }

    /// Merge text from a reader
    pub fn read_from<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.merge_str(&text)
    }

    /// Merge a config file into the store
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        self.merge_str(&text)?;
        info!(path = %path.display(), sections = self.roots.len(), "Loaded configuration");
        Ok(())
    }

    /// Write the rendered store to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        format::write_store(writer, self, &self.config)
    }

    /// Write the rendered store to a file, replacing it
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.text_content())?;
        info!(path = %path.display(), sections = self.roots.len(), "Saved configuration");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
