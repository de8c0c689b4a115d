pub mod db;
pub use db::Db;

pub mod document;
pub use document::{
    ComponentRef, CreateParams, DeleteParams, DeleteResult, DocumentId, DocumentVersion, Documents,
    FindParams, LocaleScope, PublishParams, PublishResult, Status, UpdateParams,
};

pub mod inspector;
pub use inspector::{IndexDefinitionParser, ParenthesizedColumns, SchemaInspector};

pub use vellum_core::driver;
pub use vellum_core::{
    driver::{Catalog, Driver, IsolationLevel},
    schema::{
        app::{Component, ContentType, Registry, ScalarType},
        db::{Column, ColumnArg, ColumnType, ForeignKey, Index, IndexKind, ReferentialAction, Schema, Table},
    },
    stmt, Error, Result,
};
