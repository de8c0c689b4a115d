use super::{content_type::scalar, join_table_name, Attribute, ScalarType};

use indexmap::IndexMap;

/// A reusable group of fields stored in its own table and owned by exactly
/// one document version or parent component row.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Identifier, e.g. `shared.seo`
    pub uid: String,

    pub table: String,

    /// Scalars and nested components. Components cannot hold dynamic zones.
    pub attributes: IndexMap<String, Attribute>,
}

impl Component {
    pub fn new(uid: impl Into<String>, table: impl Into<String>) -> Component {
        Component {
            uid: uid.into(),
            table: table.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn scalar(mut self, name: &str, ty: ScalarType) -> Component {
        self.attributes.insert(name.to_string(), scalar(name, ty, false));
        self
    }

    pub fn required(mut self, name: &str, ty: ScalarType) -> Component {
        self.attributes.insert(name.to_string(), scalar(name, ty, true));
        self
    }

    pub fn component(mut self, name: &str, component: &str, repeatable: bool) -> Component {
        self.attributes.insert(
            name.to_string(),
            Attribute::Component {
                component: component.to_string(),
                repeatable,
            },
        );
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn join_table(&self) -> String {
        join_table_name(&self.table)
    }

    pub fn has_components(&self) -> bool {
        self.attributes.values().any(Attribute::is_owned_component)
    }
}
