use std::fmt::Debug;

/// Extracts the indexed columns from an index's `CREATE INDEX` definition.
pub trait IndexDefinitionParser: Debug + Send + Sync {
    fn columns(&self, definition: &str) -> Vec<String>;
}

/// Takes the first non-empty parenthesised group and splits it on commas.
///
/// Good enough for plain column indexes. Expression indexes yield the inner
/// expression text rather than column names, and expressions containing
/// commas or nested parentheses are not split correctly.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParenthesizedColumns;

impl IndexDefinitionParser for ParenthesizedColumns {
    fn columns(&self, definition: &str) -> Vec<String> {
        let mut rest = definition;

        while let Some(open) = rest.find('(') {
            let after = &rest[open + 1..];
            let Some(close) = after.find(')') else {
                break;
            };

            let group = after[..close].trim();
            if !group.is_empty() {
                return group
                    .split(',')
                    .map(|column| column.trim().trim_matches('"').to_string())
                    .filter(|column| !column.is_empty())
                    .collect();
            }

            rest = &after[close + 1..];
        }

        vec![]
    }
}
