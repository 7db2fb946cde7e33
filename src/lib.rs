//! # unjoin
//!
//! Rebuilds nested object graphs from the flat rows of a multi-table SQL join.
//!
//! ## Quick Start
//!
//! ```rust
//! use unjoin::prelude::*;
//!
//! # fn main() -> unjoin::Result<()> {
//! let config = ConfigBuilder::new()
//!     .table("user")
//!     .table("role")
//!     .parent("user")
//!     .foreign_key("user_id")
//!     .many_to_many()
//!     .remove_link_key()
//!     .table("address")
//!     .parent("user")
//!     .foreign_key("user_id")
//!     .many_to_one()
//!     .remove_link_key()
//!     .finalize()?;
//!
//! let rows = [
//!     FlatRow::new()
//!         .with("user-id", 1)
//!         .with("role-id", 1)
//!         .with("role-user_id", 1)
//!         .with("address-id", 1)
//!         .with("address-user_id", 1),
//!     FlatRow::new()
//!         .with("user-id", 1)
//!         .with("role-id", 1)
//!         .with("role-user_id", 1)
//!         .with("address-id", 2)
//!         .with("address-user_id", 1),
//! ];
//!
//! let users = map(&config, &rows)?;
//! assert_eq!(users.len(), 1);
//! assert_eq!(users[0].get("role").and_then(Node::as_list).map(<[_]>::len), Some(1));
//! assert_eq!(users[0].get("address").and_then(Node::as_list).map(<[_]>::len), Some(2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Relationship kinds
//!
//! | Kind         | Attached as         | Deduplicated                      |
//! |--------------|---------------------|-----------------------------------|
//! | `OneToOne`   | record or `null`    | by primary key while grouping     |
//! | `OneToMany`  | first match or `null` | per parent while nesting        |
//! | `ManyToOne`  | list                | by primary key while grouping     |
//! | `ManyToMany` | list                | per parent while nesting          |
//!
//! ## Features
//!
//! | Feature     | Enables                                              |
//! |-------------|------------------------------------------------------|
//! | `serde`     | `Serialize` for output, rows from `serde_json` values |
//! | `chrono`    | date, time and datetime scalars                      |
//! | `tracing`   | `tracing` events for every pass                      |
//! | `profiling` | puffin scopes for every pass                         |

#![cfg_attr(docsrs, feature(doc_cfg))]

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for mapping operations
pub use unjoin_core::error::Result;

/// Error types
pub mod error {
    pub use unjoin_core::error::{ConfigError, Error};
}

/// Engine types and passes.
///
/// The individual passes are public for callers that want the intermediate
/// records instead of the final output:
///
/// ```rust
/// use unjoin::core::{ConfigBuilder, FlatRow, Materializer, flatten_all};
///
/// let config = ConfigBuilder::new().table("user").finalize().unwrap();
/// let rows = [FlatRow::new().with("user-id", 7)];
///
/// let materializer = Materializer::new();
/// let grouped = materializer.group(&config, &rows);
/// let users = flatten_all(materializer.nest(&config, grouped));
/// assert_eq!(users.len(), 1);
/// ```
pub mod core {
    pub use unjoin_core::*;
}

#[doc(inline)]
pub use unjoin_core::{
    Attributes, ConfigBuilder, FlatRow, FromValue, Mapper, Node, Object, Projected,
    RelationKind, RelationshipConfig, TableDescriptor, Value, map, map_struct, map_struct_with,
    map_with,
};

/// JSON conversion helpers.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod json {
    pub use unjoin_core::json::{node_to_json, object_to_json, to_json_array, value_to_json};
}

/// Prelude - import this for building configs and mapping rows.
pub mod prelude {
    pub use unjoin_core::{
        Attributes, ConfigBuilder, FlatRow, FromValue, Mapper, Node, Object, Projected,
        RelationKind, RelationshipConfig, Value, map, map_struct, map_struct_with, map_with,
    };
}
