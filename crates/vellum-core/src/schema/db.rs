//! Portable, engine-agnostic description of a relational schema.
//!
//! This is what the schema inspector produces from a live database catalog,
//! and what the content-type registry derives for the tables it owns. Both
//! sides use the same shapes so a schema-sync step can compare them.

mod column;
pub use column::Column;

mod foreign_key;
pub use foreign_key::{ForeignKey, ReferentialAction};

mod index;
pub use index::{Index, IndexKind};

mod schema;
pub use schema::Schema;

mod table;
pub use table::Table;

mod ty;
pub use ty::{ColumnArg, ColumnType};
