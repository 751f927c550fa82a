//! Configuration for gitcfg
//!
//! Controls the text layout produced by the serializer and the leniency of
//! the parser. Defaults reproduce the canonical layout:
//!
//! ```text
//! [user]
//! 		name = Timoteo Ponce
//!
//! [merge 'tool']
//! 		path = /usr/bin
//! ```

/// Main configuration for a store's text format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Serializer Configuration
    // -------------------------------------------------------------------------
    /// Prefix written before every `key = value` line
    pub indent: String,

    /// Quote written around sub-section names in headers (`'` or `"`)
    pub subsection_quote: char,

    // -------------------------------------------------------------------------
    // Parser Configuration
    // -------------------------------------------------------------------------
    /// Skip lines starting with `#` or `;`
    pub allow_comments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: "\t\t".to_string(),
            subsection_quote: '\'',
            allow_comments: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the indentation of variable lines
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.config.indent = indent.into();
        self
    }

    /// Set the sub-section quote character
    ///
    /// Anything other than `"` falls back to `'`, since the parser only
    /// recognizes those two.
    pub fn subsection_quote(mut self, quote: char) -> Self {
        self.config.subsection_quote = if quote == '"' { '"' } else { '\'' };
        self
    }

    /// Enable or disable comment skipping
    pub fn allow_comments(mut self, allow: bool) -> Self {
        self.config.allow_comments = allow;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
