use super::{DocumentId, Status};
use crate::Result;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use vellum_core::{
    schema::app::{columns, Attribute, ContentType},
    stmt::Row,
};

/// One stored version of a document: a (locale, status) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    /// Row id; changes whenever the version is replaced
    pub id: i64,

    pub document_id: DocumentId,

    /// `None` for content types without localization
    pub locale: Option<String>,

    pub status: Status,

    pub published_at: Option<DateTime<Utc>>,

    /// Scalar attribute values
    pub fields: IndexMap<String, serde_json::Value>,

    pub components: Vec<ComponentRef>,

    pub dynamic_zones: Vec<ComponentRef>,
}

/// Link from a version (or component) to one component row it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRef {
    /// Attribute holding the component
    pub field: String,

    /// Component uid
    pub component: String,

    /// Row id in the component's table
    pub id: i64,

    /// Position within the attribute
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub document_id: DocumentId,

    /// Versions removed by the delete
    pub entries: Vec<DocumentVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub document_id: DocumentId,

    /// Versions written (publish, discard) or removed (unpublish)
    pub entries: Vec<DocumentVersion>,
}

impl DocumentVersion {
    /// Builds a version from its row and the rows of its join table.
    pub(crate) fn from_rows(
        content_type: &ContentType,
        row: &Row,
        join_rows: &[Row],
    ) -> Result<DocumentVersion> {
        let id = row.get_i64(columns::ID)?;
        let published_at = row.get(columns::PUBLISHED_AT).to_opt_timestamp()?;

        let mut fields = IndexMap::new();
        for (name, attribute) in &content_type.attributes {
            if let Attribute::Scalar(scalar) = attribute {
                fields.insert(name.clone(), row.get(&scalar.column).to_json());
            }
        }

        let mut components = vec![];
        let mut dynamic_zones = vec![];

        for join_row in join_rows {
            if join_row.get_i64(columns::ENTITY_ID)? != id {
                continue;
            }

            let component_ref = ComponentRef {
                field: join_row.get_string(columns::FIELD)?,
                component: join_row.get_string(columns::COMPONENT_TYPE)?,
                id: join_row.get_i64(columns::CMP_ID)?,
                order: join_row.get_i64(columns::ORDER)?,
            };

            match content_type.attribute(&component_ref.field) {
                Some(Attribute::DynamicZone { .. }) => dynamic_zones.push(component_ref),
                _ => components.push(component_ref),
            }
        }

        Ok(DocumentVersion {
            id,
            document_id: row.get_string(columns::DOCUMENT_ID)?.into(),
            locale: row.get(columns::LOCALE).to_opt_string()?,
            status: if published_at.is_some() {
                Status::Published
            } else {
                Status::Draft
            },
            published_at,
            fields,
            components,
            dynamic_zones,
        })
    }
}
