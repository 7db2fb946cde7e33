//! Table descriptors and relationship kinds.

use std::sync::Arc;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::error::Result;
use crate::project::Attributes;

/// Per-table constructor turning projected attributes into a caller type.
pub type Projector<T> = Arc<dyn Fn(Attributes<T>) -> Result<T> + Send + Sync>;

/// How a nested table hangs off its parent.
///
/// The names describe the shape that is kept, not the usual ORM
/// multiplicity: `ManyToOne` and `ManyToMany` attach a list,
/// `OneToOne` and `OneToMany` attach the first matching record only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    pub const ALL: &'static [&'static str] =
        &["one-to-one", "one-to-many", "many-to-one", "many-to-many"];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToOne => "many-to-one",
            Self::ManyToMany => "many-to-many",
        }
    }

    /// Multi-link tables keep every row at grouping time, keyed by sequence
    /// number, and are only deduplicated per parent when attached.
    #[inline]
    pub const fn is_multi_link(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }

    /// Whether the attached value is a list rather than a single record.
    #[inline]
    pub const fn keeps_many(self) -> bool {
        matches!(self, Self::ManyToOne | Self::ManyToMany)
    }
}

impl core::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "one-to-one" => Ok(Self::OneToOne),
            "one-to-many" => Ok(Self::OneToMany),
            "many-to-one" => Ok(Self::ManyToOne),
            "many-to-many" => Ok(Self::ManyToMany),
            _ => Err(format!(
                "unknown relationship kind '{s}', expected one of: {}",
                Self::ALL.join(", ")
            )),
        }
    }
}

/// Everything the mapper knows about one table alias.
pub struct TableDescriptor<T> {
    pub(crate) alias: CompactString,
    pub(crate) primary_key: CompactString,
    pub(crate) parent: Option<CompactString>,
    pub(crate) foreign_key: Option<CompactString>,
    pub(crate) kind: Option<RelationKind>,
    pub(crate) rename: Option<CompactString>,
    pub(crate) excluded: SmallVec<[CompactString; 4]>,
    pub(crate) projector: Option<Projector<T>>,
}

impl<T> TableDescriptor<T> {
    pub(crate) fn new(alias: CompactString, primary_key: CompactString) -> Self {
        Self {
            alias,
            primary_key,
            parent: None,
            foreign_key: None,
            kind: None,
            rename: None,
            excluded: SmallVec::new(),
            projector: None,
        }
    }

    /// Column prefix of this table in flat rows.
    #[inline]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[inline]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Alias of the table this one is nested under, as declared.
    #[inline]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[inline]
    pub fn foreign_key(&self) -> Option<&str> {
        self.foreign_key.as_deref()
    }

    #[inline]
    pub fn kind(&self) -> Option<RelationKind> {
        self.kind
    }

    #[inline]
    pub fn rename(&self) -> Option<&str> {
        self.rename.as_deref()
    }

    /// Key under which this table's data is attached or returned.
    #[inline]
    pub fn output_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.alias)
    }

    pub fn excluded_fields(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(CompactString::as_str)
    }

    #[inline]
    pub fn is_excluded(&self, field: &str) -> bool {
        self.excluded.iter().any(|f| f == field)
    }

    #[inline]
    pub fn has_projector(&self) -> bool {
        self.projector.is_some()
    }

    #[inline]
    pub fn is_multi_link(&self) -> bool {
        self.kind.is_some_and(RelationKind::is_multi_link)
    }

    pub(crate) fn projector(&self) -> Option<&Projector<T>> {
        self.projector.as_ref()
    }

    pub(crate) fn exclude(&mut self, field: CompactString) {
        if !self.is_excluded(&field) {
            self.excluded.push(field);
        }
    }
}

impl<T> Clone for TableDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            alias: self.alias.clone(),
            primary_key: self.primary_key.clone(),
            parent: self.parent.clone(),
            foreign_key: self.foreign_key.clone(),
            kind: self.kind,
            rename: self.rename.clone(),
            excluded: self.excluded.clone(),
            projector: self.projector.clone(),
        }
    }
}

impl<T> core::fmt::Debug for TableDescriptor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableDescriptor")
            .field("alias", &self.alias)
            .field("primary_key", &self.primary_key)
            .field("parent", &self.parent)
            .field("foreign_key", &self.foreign_key)
            .field("kind", &self.kind)
            .field("rename", &self.rename)
            .field("excluded", &self.excluded)
            .field("projector", &self.projector.is_some())
            .finish()
    }
}
