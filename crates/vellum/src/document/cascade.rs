use crate::{Db, Result};

use indexmap::IndexMap;
use vellum_core::{
    schema::app::{columns, ContentType},
    stmt::{Delete, Expr, Select},
};

/// Every row removed when deleting a set of owner rows, resolved before
/// anything is deleted.
///
/// Steps run children first: the deepest component rows, the join rows
/// pointing at them, their owners, and so on up to the owner join rows and
/// the owner rows themselves. The plan must be resolved and executed on the
/// same transaction.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CascadePlan {
    steps: Vec<DeleteStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DeleteStep {
    pub(crate) table: String,
    pub(crate) ids: Vec<i64>,
}

/// Rows of one table at one depth of the walk.
struct Node {
    table: String,
    join_table: Option<String>,
    ids: Vec<i64>,
}

impl CascadePlan {
    /// Plan for deleting the version rows `ids` and everything they own.
    pub(crate) async fn for_versions(
        db: &Db,
        content_type: &ContentType,
        ids: Vec<i64>,
    ) -> Result<CascadePlan> {
        let root = Node {
            table: content_type.table.clone(),
            join_table: content_type
                .has_components()
                .then(|| content_type.join_table()),
            ids,
        };

        CascadePlan::resolve(db, root, None).await
    }

    /// Plan for deleting the components `owner_id` holds in `field`. The
    /// owner row itself stays.
    pub(crate) async fn for_field(
        db: &Db,
        content_type: &ContentType,
        owner_id: i64,
        field: &str,
    ) -> Result<CascadePlan> {
        let root = Node {
            table: content_type.table.clone(),
            join_table: Some(content_type.join_table()),
            ids: vec![owner_id],
        };

        CascadePlan::resolve(db, root, Some(field)).await
    }

    async fn resolve(db: &Db, root: Node, field: Option<&str>) -> Result<CascadePlan> {
        let registry = db.registry();
        let keep_root = field.is_some();

        let mut levels: Vec<Vec<DeleteStep>> = vec![];
        let mut frontier = vec![root];

        while !frontier.is_empty() {
            let depth = levels.len();
            let mut steps = vec![];
            let mut rows = vec![];
            let mut next: IndexMap<String, Vec<i64>> = IndexMap::new();

            for node in frontier {
                if let Some(join_table) = node.join_table {
                    let mut select = Select::new(
                        &join_table,
                        Expr::in_list(columns::ENTITY_ID, node.ids.iter().copied()),
                    );

                    if depth == 0 {
                        if let Some(field) = field {
                            select = select.and(Expr::eq(columns::FIELD, field));
                        }
                    }

                    let links = db.query(select).await?;
                    let mut link_ids = Vec::with_capacity(links.len());

                    for link in &links {
                        link_ids.push(link.get_i64(columns::ID)?);
                        next.entry(link.get_string(columns::COMPONENT_TYPE)?)
                            .or_default()
                            .push(link.get_i64(columns::CMP_ID)?);
                    }

                    if !link_ids.is_empty() {
                        steps.push(DeleteStep {
                            table: join_table,
                            ids: link_ids,
                        });
                    }
                }

                if !node.ids.is_empty() && !(depth == 0 && keep_root) {
                    rows.push(DeleteStep {
                        table: node.table,
                        ids: node.ids,
                    });
                }
            }

            steps.extend(rows);
            levels.push(steps);

            frontier = next
                .into_iter()
                .map(|(uid, ids)| {
                    let component = registry.component(&uid)?;
                    Ok(Node {
                        table: component.table.clone(),
                        join_table: component
                            .has_components()
                            .then(|| component.join_table()),
                        ids,
                    })
                })
                .collect::<Result<_>>()?;
        }

        Ok(CascadePlan {
            steps: levels.into_iter().rev().flatten().collect(),
        })
    }

    #[cfg(test)]
    fn steps(&self) -> &[DeleteStep] {
        &self.steps
    }

    /// Runs every step, returning the number of rows deleted.
    pub(crate) async fn execute(&self, db: &Db) -> Result<u64> {
        let mut deleted = 0;

        for step in &self.steps {
            let count = db
                .exec(Delete::new(
                    &step.table,
                    Expr::in_list(columns::ID, step.ids.iter().copied()),
                ))
                .await?
                .into_count()?;

            tracing::debug!(table = %step.table, rows = count, "cascade delete");
            deleted += count;
        }

        Ok(deleted)
    }
}
