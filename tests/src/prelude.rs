//! Common imports for test files: `use tests::prelude::*;`

pub use crate::{article_data, assert_integrity, row_counts, tests, TestDb, ARTICLE, HOMEPAGE};

pub use pretty_assertions::assert_eq;
pub use serde_json::json;
pub use std_util::prelude::*;
pub use vellum::{
    CreateParams, DeleteParams, DocumentId, FindParams, LocaleScope, PublishParams, Status,
    UpdateParams,
};
