//! Resource tag filters for SamStack
//!
//! Provides the model behind tag filter editing:
//! - Tag filter rows (enabled flag, key, values)
//! - Conversion of the active rows to the tagging API request shape
//! - A tag key catalogue filled asynchronously from a key source

pub mod filter;
pub mod keys;

pub use filter::{ApiTagFilter, TagFilter, TagFilterSet};
pub use keys::{StaticTagKeys, TagError, TagKeyProvider, TagKeySource};
