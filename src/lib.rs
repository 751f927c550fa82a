//! # gitcfg
//!
//! A hierarchical, text-backed configuration store for git-style config
//! files:
//! - Two-level sections: root → optional sub-section → variables
//! - Dotted composed keys (`user.name`, `merge.tool.path`)
//! - Section removal and renaming, including moves between levels
//! - Round-trip parsing and serialization of the sectioned text format
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Public API                            │
//! │              (Store: get / set / remove / rename)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Key Resolver                             │
//! │         (root.key │ root.sub.key │ root │ root.sub)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ RootSection │─────────►│   Section   │
//!   │ (variables) │  1 level │ (variables) │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │   Format    │
//!   │parse/render │
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use gitcfg::Store;
//!
//! let mut store = Store::parse("[user]\n  name = Timoteo Ponce\n").unwrap();
//! store.set("merge.tool.path", "/usr/bin").unwrap();
//!
//! assert_eq!(store.get("user.name").unwrap(), "Timoteo Ponce");
//! assert_eq!(store.get("user.email").unwrap(), "");
//! assert!(store.text_content().contains("[merge 'tool']"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod section;
pub mod format;
pub mod store;
pub mod cursor;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ConfigError, Result};
pub use config::Config;
pub use cursor::Cursor;
pub use section::{RootSection, Section};
pub use shared::SharedStore;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gitcfg
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
