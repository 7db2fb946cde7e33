pub mod config;
pub mod conversions;
pub mod entity;
pub mod error;
pub mod flatten;
pub mod mapper;
pub mod materialize;
pub mod node;
pub mod profiling;
pub mod project;
pub mod row;
pub mod tracing;
pub mod value;

#[cfg(feature = "serde")]
pub mod json;

// Re-export key types and traits
pub use config::{ConfigBuilder, Projector, RelationKind, RelationshipConfig, TableDescriptor};
pub use conversions::FromValue;
pub use entity::{Entity, EntitySet, Slot};
pub use error::{ConfigError, Error, Result};
pub use flatten::{flatten, flatten_all};
pub use mapper::{Mapper, map, map_struct, map_struct_with, map_with};
pub use materialize::{Grouped, Materializer};
pub use node::{Node, Object};
pub use project::{Attributes, Projected, project};
pub use row::{DEFAULT_DELIMITER, FlatRow};
pub use value::Value;

#[cfg(feature = "serde")]
pub use json::to_json_array;
