use compact_str::CompactString;
use thiserror::Error;

/// Errors raised while building or validating a [`RelationshipConfig`](crate::RelationshipConfig).
///
/// Every variant is detected before any row is looked at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A table-scoped builder call was made before any `table(..)`
    #[error("`{operation}` called before any table was registered")]
    NoCurrentTable { operation: &'static str },

    /// `finalize()` on a builder with no tables
    #[error("no tables registered")]
    Empty,

    /// The same alias was registered twice
    #[error("table `{0}` registered more than once")]
    DuplicateTable(CompactString),

    /// The first registered table must not be nested under anything
    #[error("root table `{0}` cannot declare a parent")]
    RootHasParent(CompactString),

    /// A parent alias that matches no registered table (or rename)
    #[error("table `{table}` references unknown parent `{parent}`")]
    UnknownParent {
        table: CompactString,
        parent: CompactString,
    },

    /// A nested table needs the column that links it to its parent
    #[error("table `{0}` has a parent but no foreign key")]
    MissingForeignKey(CompactString),

    /// A nested table needs a relationship kind to choose its shape
    #[error("table `{0}` has a parent but no relationship kind")]
    MissingRelationKind(CompactString),

    /// Two tables would be attached under the same key of one parent
    #[error("tables `{first}` and `{second}` both attach as `{name}` under `{parent}`")]
    DuplicateOutputName {
        parent: CompactString,
        name: CompactString,
        first: CompactString,
        second: CompactString,
    },

    /// The parent relationships loop back on themselves
    #[error("cyclic parent relationships between tables: {}", .0.join(", "))]
    Cycle(Vec<CompactString>),

    /// Typed mapping needs a projector on the root table
    #[error("root table `{0}` has no projector")]
    MissingRootProjector(CompactString),

    /// Qualified column names cannot be split on an empty delimiter
    #[error("delimiter must not be empty")]
    EmptyDelimiter,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid relationship configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A projector could not build its typed value
    #[error("Projection error: {0}")]
    Projection(String),

    /// A row could not be read as flat scalar cells
    #[error("Input error: {0}")]
    Input(String),
}

/// Result type for mapping operations
pub type Result<T> = std::result::Result<T, Error>;
