use super::{columns, Attribute, Registry};
use crate::{Error, Result};

use std::collections::{HashMap, HashSet};

struct Verify<'a> {
    registry: &'a Registry,
}

impl Registry {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { registry: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_table_names_are_unique()?;
        self.verify_columns()?;
        self.verify_component_references()?;
        self.verify_components_are_acyclic()?;
        Ok(())
    }

    fn verify_table_names_are_unique(&self) -> Result<()> {
        let mut seen = HashMap::new();

        let owners = self
            .registry
            .content_types()
            .map(|ct| (&ct.uid, &ct.table, ct.has_components()))
            .chain(
                self.registry
                    .components()
                    .map(|c| (&c.uid, &c.table, c.has_components())),
            );

        for (uid, table, has_join_table) in owners {
            let mut names = vec![table.clone()];
            if has_join_table {
                names.push(super::join_table_name(table));
            }

            for name in names {
                if let Some(other) = seen.insert(name.clone(), uid) {
                    return Err(Error::invalid_schema(format!(
                        "table `{name}` is used by both `{other}` and `{uid}`"
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_columns(&self) -> Result<()> {
        for content_type in self.registry.content_types() {
            let mut seen: HashSet<&str> = columns::SYSTEM.iter().copied().collect();

            for (name, attribute) in &content_type.attributes {
                let Some(scalar) = attribute.as_scalar() else {
                    continue;
                };

                if !seen.insert(&scalar.column) {
                    return Err(Error::invalid_schema(format!(
                        "attribute `{name}` of `{}` maps to reserved or duplicate column `{}`",
                        content_type.uid, scalar.column
                    )));
                }
            }
        }

        for component in self.registry.components() {
            let mut seen = HashSet::from([columns::ID]);

            for (name, attribute) in &component.attributes {
                match attribute {
                    Attribute::DynamicZone { .. } => {
                        return Err(Error::invalid_schema(format!(
                            "component `{}` cannot hold dynamic zone `{name}`",
                            component.uid
                        )));
                    }
                    Attribute::Scalar(scalar) if !seen.insert(&scalar.column) => {
                        return Err(Error::invalid_schema(format!(
                            "attribute `{name}` of `{}` maps to reserved or duplicate column `{}`",
                            component.uid, scalar.column
                        )));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn verify_component_references(&self) -> Result<()> {
        let owners = self
            .registry
            .content_types()
            .map(|ct| (&ct.uid, &ct.attributes))
            .chain(self.registry.components().map(|c| (&c.uid, &c.attributes)));

        for (owner, attributes) in owners {
            for (name, attribute) in attributes {
                if let Attribute::DynamicZone { components } = attribute {
                    if components.is_empty() {
                        return Err(Error::invalid_schema(format!(
                            "dynamic zone `{name}` of `{owner}` allows no components"
                        )));
                    }
                }

                for uid in attribute.component_uids() {
                    if !self.registry.components.contains_key(uid) {
                        return Err(Error::invalid_schema(format!(
                            "attribute `{name}` of `{owner}` references unknown component `{uid}`"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Nesting must terminate, otherwise cascades would never finish.
    fn verify_components_are_acyclic(&self) -> Result<()> {
        let mut done = HashSet::new();

        for uid in self.registry.components.keys() {
            let mut path = vec![];
            self.visit(uid, &mut path, &mut done)?;
        }

        Ok(())
    }

    fn visit<'a>(
        &'a self,
        uid: &'a str,
        path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Result<()> {
        if done.contains(uid) {
            return Ok(());
        }

        if path.contains(&uid) {
            path.push(uid);
            return Err(Error::invalid_schema(format!(
                "components nest cyclically: {}",
                path.join(" -> ")
            )));
        }

        path.push(uid);
        let component = &self.registry.components[uid];
        for attribute in component.attributes.values() {
            for child in attribute.component_uids() {
                self.visit(child, path, done)?;
            }
        }
        path.pop();

        done.insert(uid);
        Ok(())
    }
}
