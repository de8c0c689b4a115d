use std::collections::{BTreeMap, HashMap, HashSet};
use vellum::{
    stmt::{Row, Select},
    Db,
};

/// Rows per fixture table, read through the database handle.
pub async fn row_counts(db: &Db) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    for table in db.registry().db_schema().tables {
        let rows = db.query(Select::all(&table.name)).await.unwrap();
        counts.insert(table.name, rows.len());
    }

    counts
}

/// Checks the ownership invariants of component rows:
///
/// * every join row points at an existing owner row and component row;
/// * every component row is referenced by exactly one join row.
pub async fn assert_integrity(db: &Db) {
    let registry = db.registry();

    let mut ids: HashMap<String, HashSet<i64>> = HashMap::new();
    for table in registry.db_schema().tables {
        let rows = db.query(Select::all(&table.name)).await.unwrap();
        ids.insert(table.name, rows.iter().map(id).collect());
    }

    let mut owners = vec![];
    for content_type in registry.content_types() {
        if content_type.has_components() {
            owners.push((content_type.table.clone(), content_type.join_table()));
        }
    }
    for component in registry.components() {
        if component.has_components() {
            owners.push((component.table.clone(), component.join_table()));
        }
    }

    let mut references: HashMap<(String, i64), usize> = HashMap::new();

    for (owner_table, join_table) in owners {
        for link in db.query(Select::all(&join_table)).await.unwrap() {
            let entity_id = link.get_i64("entity_id").unwrap();
            assert!(
                ids[&owner_table].contains(&entity_id),
                "{join_table} row {} points at missing {owner_table} row {entity_id}",
                id(&link)
            );

            let component = registry
                .component(&link.get_string("component_type").unwrap())
                .unwrap();
            let cmp_id = link.get_i64("cmp_id").unwrap();
            assert!(
                ids[&component.table].contains(&cmp_id),
                "{join_table} row {} points at missing {} row {cmp_id}",
                id(&link),
                component.table
            );

            *references.entry((component.table.clone(), cmp_id)).or_default() += 1;
        }
    }

    for component in registry.components() {
        for cmp_id in &ids[&component.table] {
            let count = references
                .get(&(component.table.clone(), *cmp_id))
                .copied()
                .unwrap_or(0);
            assert_eq!(
                count, 1,
                "{} row {cmp_id} is referenced {count} times",
                component.table
            );
        }
    }
}

fn id(row: &Row) -> i64 {
    row.get_i64("id").unwrap()
}
