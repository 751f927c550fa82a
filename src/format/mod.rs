//! Format Module
//!
//! Text representation of a store.
//!
//! ## Layout
//! ```text
//! [rootName]
//! 		key1 = value1
//! 		key2 = value2
//!
//! [rootName 'subName']
//! 		key3 = value3
//! ```
//!
//! ### Headers
//! - `[root]`: root section
//! - `[root 'sub']` or `[root "sub"]`: sub-section of `root`
//!
//! ### Variables
//! - `key = value`, split on the first `=`, both sides trimmed
//! - No quoting or escaping is interpreted
//! - A blank line or a new header ends a block

mod parser;
mod serializer;

pub use parser::{parse_header, parse_into, Header};
pub use serializer::{render, write_store};
