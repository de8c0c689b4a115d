use super::{Component, ContentType, Registry};
use crate::Result;

use indexmap::IndexMap;

/// Collects content types and components, then verifies them as a whole.
#[derive(Debug, Default)]
pub struct Builder {
    content_types: Vec<ContentType>,
    components: Vec<Component>,
}

impl Builder {
    pub fn content_type(mut self, content_type: ContentType) -> Builder {
        self.content_types.push(content_type);
        self
    }

    pub fn component(mut self, component: Component) -> Builder {
        self.components.push(component);
        self
    }

    pub fn build(self) -> Result<Registry> {
        let mut content_types = IndexMap::new();
        for content_type in self.content_types {
            let uid = content_type.uid.clone();
            if content_types.insert(uid.clone(), content_type).is_some() {
                return Err(crate::Error::invalid_schema(format!(
                    "duplicate content type `{uid}`"
                )));
            }
        }

        let mut components = IndexMap::new();
        for component in self.components {
            let uid = component.uid.clone();
            if components.insert(uid.clone(), component).is_some() {
                return Err(crate::Error::invalid_schema(format!(
                    "duplicate component `{uid}`"
                )));
            }
        }

        let registry = Registry {
            content_types,
            components,
        };
        registry.verify()?;
        Ok(registry)
    }
}
