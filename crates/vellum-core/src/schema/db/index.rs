use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name is unique within the schema
    pub name: String,

    /// Indexed columns, in index order. Expression indexes may carry the
    /// literal expression text instead of a column name.
    pub columns: Vec<String>,

    #[serde(rename = "type")]
    pub kind: IndexKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// The table's primary key. Implies uniqueness.
    Primary,

    /// Indexed entries are unique
    Unique,

    /// Plain lookup index
    Secondary,
}

impl Index {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
        kind: IndexKind,
    ) -> Index {
        Index {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            kind,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self.kind, IndexKind::Primary)
    }

    /// `true` for unique and primary indexes.
    pub fn is_unique(&self) -> bool {
        matches!(self.kind, IndexKind::Primary | IndexKind::Unique)
    }
}

impl IndexKind {
    /// Classifies an index from the catalog's flags. Primary wins when both
    /// are set.
    pub fn from_flags(unique: bool, primary: bool) -> IndexKind {
        if primary {
            IndexKind::Primary
        } else if unique {
            IndexKind::Unique
        } else {
            IndexKind::Secondary
        }
    }
}
