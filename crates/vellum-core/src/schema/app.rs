//! Content-type registry: maps content-type and component identifiers to
//! their physical tables and attribute layout.

mod attribute;
pub use attribute::{Attribute, Scalar, ScalarType};

mod builder;
pub use builder::Builder;

mod component;
pub use component::Component;

mod content_type;
pub use content_type::ContentType;

mod registry;
pub use registry::Registry;

mod tables;
pub use tables::{columns, join_table_name};

mod verify;
