//! Section Module
//!
//! The two levels of the data model.
//!
//! ## Structure
//! ```text
//! RootSection "merge"
//!   ├── variables: { ... }
//!   └── subsections
//!         └── Section "tool"
//!               └── variables: { command = merge, path = /usr/bin }
//! ```
//!
//! `RootSection` holds plain `Section`s only, so a sub-section can never
//! carry sub-sections of its own.
//!
//! ## Data Structure Choice
//! BTreeMap everywhere: sorted iteration gives deterministic key sets and
//! serializer output.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::key::compose;

/// Local key → value mapping owned by one section
pub type VariableBag = BTreeMap<String, String>;

// =============================================================================
// Section
// =============================================================================

/// A named group of variables
///
/// Equality and hashing consider the name only.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    variables: VariableBag,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: VariableBag::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get a variable, if present
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Insert or overwrite a variable
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Remove a variable, returning its old value
    pub fn remove_variable(&mut self, key: &str) -> Option<String> {
        self.variables.remove(key)
    }

    /// Read-only view of the variables
    pub fn variables(&self) -> &VariableBag {
        &self.variables
    }

    /// Number of variables in this section
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Move every variable of `other` into this section, overwriting
    pub(crate) fn absorb(&mut self, other: VariableBag) {
        self.variables.extend(other);
    }

    pub(crate) fn into_variables(self) -> VariableBag {
        self.variables
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Section {}

impl Hash for Section {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// =============================================================================
// RootSection
// =============================================================================

/// A top-level section with optional sub-sections
///
/// Like `Section`, identity is the name.
#[derive(Debug, Clone)]
pub struct RootSection {
    section: Section,
    subsections: BTreeMap<String, Section>,
}

impl PartialEq for RootSection {
    fn eq(&self, other: &Self) -> bool {
        self.section == other.section
    }
}

impl Eq for RootSection {}

impl Hash for RootSection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.section.hash(state);
    }
}

impl RootSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            section: Section::new(name),
            subsections: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.section.name()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.section.set_name(name);
    }

    /// The root's own variables
    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn section_mut(&mut self) -> &mut Section {
        &mut self.section
    }

    /// Look up a sub-section
    pub fn subsection(&self, name: &str) -> Option<&Section> {
        self.subsections.get(name)
    }

    pub fn subsection_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.subsections.get_mut(name)
    }

    /// Get a sub-section, creating it on first reference
    pub fn subsection_or_create(&mut self, name: &str) -> &mut Section {
        self.subsections
            .entry(name.to_string())
            .or_insert_with(|| Section::new(name))
    }

    /// Insert a sub-section, merging into an existing one with the same name
    pub fn insert_subsection(&mut self, section: Section) {
        match self.subsections.get_mut(section.name()) {
            Some(existing) => existing.absorb(section.into_variables()),
            None => {
                self.subsections.insert(section.name().to_string(), section);
            }
        }
    }

    /// Detach a sub-section
    pub fn remove_subsection(&mut self, name: &str) -> Option<Section> {
        self.subsections.remove(name)
    }

    /// Sub-sections in name order
    pub fn subsections(&self) -> impl Iterator<Item = &Section> {
        self.subsections.values()
    }

    /// True when neither the root nor any sub-section holds a variable
    pub fn is_empty(&self) -> bool {
        self.section.is_empty() && self.subsections.values().all(Section::is_empty)
    }

    /// Merge another root into this one, overwriting same-named variables
    pub(crate) fn absorb(&mut self, other: RootSection) {
        self.section.absorb(other.section.into_variables());
        for (_, sub) in other.subsections {
            self.insert_subsection(sub);
        }
    }

    /// Split into the root's own section and its sub-sections
    pub(crate) fn into_parts(self) -> (Section, BTreeMap<String, Section>) {
        (self.section, self.subsections)
    }

    /// Every variable under this root, keyed by composed key
    pub fn composed_variables(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        let root = self.name();
        let own = self
            .section
            .variables()
            .iter()
            .map(move |(k, v)| (compose(root, None, k), v.as_str()));
        let nested = self.subsections.values().flat_map(move |sub| {
            sub.variables()
                .iter()
                .map(move |(k, v)| (compose(root, Some(sub.name()), k), v.as_str()))
        });
        own.chain(nested)
    }
}
