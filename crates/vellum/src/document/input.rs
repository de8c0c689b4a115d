use crate::Result;

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};
use vellum_core::{
    schema::app::{Attribute, Registry},
    stmt::Row,
    Error,
};

/// Key naming the component type of a dynamic-zone entry.
pub(crate) const COMPONENT_KEY: &str = "__component";

/// Validated write input for one owner row and the components under it.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Input {
    /// Scalar values keyed by column
    pub(crate) scalars: Row,

    /// Component attributes named in the data, cleared ones included
    pub(crate) fields: Vec<String>,

    pub(crate) components: Vec<ComponentInput>,
}

#[derive(Debug, PartialEq)]
pub(crate) struct ComponentInput {
    pub(crate) field: String,
    pub(crate) component: String,
    pub(crate) order: i64,
    pub(crate) input: Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Every required attribute must be set
    Create,

    /// Only the attributes present are touched
    Update,
}

impl Input {
    pub(crate) fn parse(
        registry: &Registry,
        attributes: &IndexMap<String, Attribute>,
        data: &Json,
        mode: Mode,
    ) -> Result<Input> {
        let empty = Map::new();
        let object = match data {
            Json::Object(object) => object,
            Json::Null => &empty,
            _ => return Err(Error::validation("Document data must be an object")),
        };

        Input::parse_object(registry, attributes, object, mode, false)
    }

    fn parse_object(
        registry: &Registry,
        attributes: &IndexMap<String, Attribute>,
        object: &Map<String, Json>,
        mode: Mode,
        dynamic_entry: bool,
    ) -> Result<Input> {
        let mut input = Input::default();

        for (name, value) in object {
            if dynamic_entry && name == COMPONENT_KEY {
                continue;
            }

            let Some(attribute) = attributes.get(name) else {
                return Err(Error::validation(format!("Unknown attribute `{name}`")));
            };

            match attribute {
                Attribute::Scalar(scalar) => {
                    input
                        .scalars
                        .insert(scalar.column.clone(), scalar.ty.coerce(name, value)?);
                }
                Attribute::Component {
                    component,
                    repeatable,
                } => {
                    input.fields.push(name.clone());

                    let entries = if *repeatable {
                        array_entries(name, value)?
                    } else {
                        match value {
                            Json::Null => vec![],
                            Json::Object(object) => vec![object],
                            _ => {
                                return Err(Error::validation(format!(
                                    "Invalid value for attribute `{name}`: expected an object"
                                )))
                            }
                        }
                    };

                    let target = registry.component(component)?;
                    for (i, entry) in entries.into_iter().enumerate() {
                        input.components.push(ComponentInput {
                            field: name.clone(),
                            component: component.clone(),
                            order: i as i64 + 1,
                            input: Input::parse_object(
                                registry,
                                &target.attributes,
                                entry,
                                Mode::Create,
                                false,
                            )?,
                        });
                    }
                }
                Attribute::DynamicZone { components } => {
                    input.fields.push(name.clone());

                    for (i, entry) in array_entries(name, value)?.into_iter().enumerate() {
                        let uid = match entry.get(COMPONENT_KEY) {
                            Some(Json::String(uid)) if components.contains(uid) => uid,
                            Some(Json::String(uid)) => {
                                return Err(Error::validation(format!(
                                    "Invalid component `{uid}` for dynamic zone `{name}`"
                                )))
                            }
                            _ => {
                                return Err(Error::validation(format!(
                                    "Entries of dynamic zone `{name}` need a `{COMPONENT_KEY}` key"
                                )))
                            }
                        };

                        let target = registry.component(uid)?;
                        input.components.push(ComponentInput {
                            field: name.clone(),
                            component: uid.clone(),
                            order: i as i64 + 1,
                            input: Input::parse_object(
                                registry,
                                &target.attributes,
                                entry,
                                Mode::Create,
                                true,
                            )?,
                        });
                    }
                }
            }
        }

        if mode == Mode::Create {
            input.check_required(attributes)?;
        }

        Ok(input)
    }

    /// Fails unless every required scalar is set to a non-null value.
    pub(crate) fn check_required(&self, attributes: &IndexMap<String, Attribute>) -> Result<()> {
        for (name, attribute) in attributes {
            let Attribute::Scalar(scalar) = attribute else {
                continue;
            };

            if scalar.required && self.scalars.get(&scalar.column).is_null() {
                return Err(Error::validation(format!(
                    "Attribute `{name}` is required"
                )));
            }
        }

        Ok(())
    }
}

fn array_entries<'a>(name: &str, value: &'a Json) -> Result<Vec<&'a Map<String, Json>>> {
    match value {
        Json::Null => Ok(vec![]),
        Json::Array(items) => items
            .iter()
            .map(|item| match item {
                Json::Object(object) => Ok(object),
                _ => Err(Error::validation(format!(
                    "Invalid value for attribute `{name}`: expected a list of objects"
                ))),
            })
            .collect(),
        _ => Err(Error::validation(format!(
            "Invalid value for attribute `{name}`: expected a list of objects"
        ))),
    }
}
