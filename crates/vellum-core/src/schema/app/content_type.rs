use super::{join_table_name, Attribute, Scalar, ScalarType};

use heck::ToSnakeCase;
use indexmap::IndexMap;

/// A collection of documents stored in one table.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentType {
    /// Stable identifier, e.g. `api::article.article`
    pub uid: String,

    /// Physical table holding one row per document version
    pub table: String,

    /// When `true`, versions carry a locale
    pub localized: bool,

    /// When `false`, every write is published immediately
    pub draft_and_publish: bool,

    pub attributes: IndexMap<String, Attribute>,
}

impl ContentType {
    /// A non-localized content type with draft & publish enabled.
    pub fn new(uid: impl Into<String>, table: impl Into<String>) -> ContentType {
        ContentType {
            uid: uid.into(),
            table: table.into(),
            localized: false,
            draft_and_publish: true,
            attributes: IndexMap::new(),
        }
    }

    pub fn localized(mut self) -> ContentType {
        self.localized = true;
        self
    }

    pub fn draft_and_publish(mut self, enabled: bool) -> ContentType {
        self.draft_and_publish = enabled;
        self
    }

    /// Adds an optional scalar attribute stored in the snake_case column of
    /// the same name.
    pub fn scalar(mut self, name: &str, ty: ScalarType) -> ContentType {
        self.attributes.insert(name.to_string(), scalar(name, ty, false));
        self
    }

    pub fn required(mut self, name: &str, ty: ScalarType) -> ContentType {
        self.attributes.insert(name.to_string(), scalar(name, ty, true));
        self
    }

    pub fn component(mut self, name: &str, component: &str, repeatable: bool) -> ContentType {
        self.attributes.insert(
            name.to_string(),
            Attribute::Component {
                component: component.to_string(),
                repeatable,
            },
        );
        self
    }

    pub fn dynamic_zone<S: Into<String>>(
        mut self,
        name: &str,
        components: impl IntoIterator<Item = S>,
    ) -> ContentType {
        self.attributes.insert(
            name.to_string(),
            Attribute::DynamicZone {
                components: components.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Join table linking versions to their component rows.
    pub fn join_table(&self) -> String {
        join_table_name(&self.table)
    }

    pub fn has_components(&self) -> bool {
        self.attributes.values().any(Attribute::is_owned_component)
    }
}

pub(super) fn scalar(name: &str, ty: ScalarType, required: bool) -> Attribute {
    Attribute::Scalar(Scalar {
        column: name.to_snake_case(),
        ty,
        required,
    })
}
