//! Multi-version documents: one draft and at most one published version per
//! locale, each owning its component rows.

mod cascade;
use cascade::CascadePlan;

mod components;
use components::{copy_version, insert_components, insert_row, join_rows};

mod id;
pub use id::DocumentId;

mod input;
use input::{Input, Mode};

mod params;
pub use params::{
    CreateParams, DeleteParams, FindParams, LocaleScope, PublishParams, Status, UpdateParams,
};

mod version;
pub use version::{ComponentRef, DeleteResult, DocumentVersion, PublishResult};

use crate::{Db, Result};

use chrono::Utc;
use vellum_core::{
    err,
    schema::app::{columns, Attribute, ContentType},
    stmt::{Expr, OrderBy, Row, Select, Update, Value},
    Error,
};

/// Document operations for one content type.
///
/// Every write runs in a single transaction; a failure anywhere leaves the
/// stored versions untouched.
#[derive(Debug)]
pub struct Documents<'a> {
    db: &'a Db,
    content_type: &'a ContentType,
}

impl<'a> Documents<'a> {
    pub(crate) fn new(db: &'a Db, content_type: &'a ContentType) -> Documents<'a> {
        Documents { db, content_type }
    }

    pub fn content_type(&self) -> &ContentType {
        self.content_type
    }

    /// Creates a new document with one draft version, published right away
    /// when asked to or when the content type has draft & publish disabled.
    #[tracing::instrument(skip_all, fields(content_type = %self.content_type.uid))]
    pub async fn create(&self, params: CreateParams) -> Result<DocumentVersion> {
        let input = Input::parse(
            self.db.registry(),
            &self.content_type.attributes,
            &params.data,
            Mode::Create,
        )?;
        let locale = self.locale_value(params.locale);
        let publish =
            params.status == Some(Status::Published) || !self.content_type.draft_and_publish;
        let document_id = DocumentId::generate();

        tracing::debug!(%document_id, ?locale, publish, "creating document");

        self.db
            .transaction(async move |tx| {
                let draft = self.insert_draft(tx, &document_id, locale, input).await?;

                let row = if publish {
                    self.publish_draft(tx, &draft).await?
                } else {
                    draft
                };

                self.version(tx, &row).await
            })
            .await
    }

    /// Updates the draft of a locale. A locale the document does not have
    /// yet is created from `data`.
    #[tracing::instrument(skip_all, fields(content_type = %self.content_type.uid, %document_id))]
    pub async fn update(
        &self,
        document_id: &DocumentId,
        params: UpdateParams,
    ) -> Result<DocumentVersion> {
        let input = Input::parse(
            self.db.registry(),
            &self.content_type.attributes,
            &params.data,
            Mode::Update,
        )?;
        let locale = self.locale_value(params.locale);

        self.db
            .transaction(async move |tx| {
                let draft = tx
                    .query(
                        self.select_document(document_id)
                            .and(locale_expr(locale.as_deref()))
                            .and(Expr::is_null(columns::PUBLISHED_AT))
                            .limit(1),
                    )
                    .await?
                    .pop();

                let draft = match draft {
                    Some(draft) => self.update_draft(tx, draft, input).await?,
                    None => {
                        let existing = tx.query(self.select_document(document_id).limit(1)).await?;
                        if existing.is_empty() {
                            return Err(Error::record_not_found(format!(
                                "document `{document_id}` of `{}`",
                                self.content_type.uid
                            )));
                        }

                        input.check_required(&self.content_type.attributes)?;
                        tracing::debug!(?locale, "creating localization");
                        self.insert_draft(tx, document_id, locale, input).await?
                    }
                };

                let row = if self.content_type.draft_and_publish {
                    draft
                } else {
                    self.publish_draft(tx, &draft).await?
                };

                self.version(tx, &row).await
            })
            .await
    }

    /// Deletes versions of a document together with the components they own.
    ///
    /// Without options every locale and status goes. Drafts cannot be
    /// deleted on their own.
    #[tracing::instrument(skip_all, fields(content_type = %self.content_type.uid, %document_id))]
    pub async fn delete(
        &self,
        document_id: &DocumentId,
        params: DeleteParams,
    ) -> Result<DeleteResult> {
        if params.status == Some(Status::Draft) {
            return Err(Error::validation("Cannot delete a draft document"));
        }

        self.db
            .transaction(async |tx| {
                let mut select = self.select_scope(document_id, &params.locale);
                if params.status == Some(Status::Published) {
                    select = select.and(Expr::is_not_null(columns::PUBLISHED_AT));
                }

                let rows = tx.query(select).await?;
                if rows.is_empty() {
                    return Err(self.not_found(document_id, &params.locale, params.status));
                }

                let entries = self.versions(tx, &rows).await?;

                let plan = CascadePlan::for_versions(tx, self.content_type, ids(&rows)?).await?;
                let deleted = plan.execute(tx).await?;
                tracing::debug!(versions = rows.len(), rows = deleted, "deleted document versions");

                Ok(DeleteResult {
                    document_id: document_id.clone(),
                    entries,
                })
            })
            .await
    }

    /// Publishes every draft in scope, replacing existing published versions.
    #[tracing::instrument(skip_all, fields(content_type = %self.content_type.uid, %document_id))]
    pub async fn publish(
        &self,
        document_id: &DocumentId,
        params: PublishParams,
    ) -> Result<PublishResult> {
        let scope = self.scope_or_default(params.locale);

        self.db
            .transaction(async |tx| {
                let drafts = tx
                    .query(
                        self.select_scope(document_id, &scope)
                            .and(Expr::is_null(columns::PUBLISHED_AT)),
                    )
                    .await?;

                if drafts.is_empty() {
                    return Err(self.not_found(document_id, &scope, Some(Status::Draft)));
                }

                let mut published = Vec::with_capacity(drafts.len());
                for draft in &drafts {
                    published.push(self.publish_draft(tx, draft).await?);
                }

                Ok(PublishResult {
                    document_id: document_id.clone(),
                    entries: self.versions(tx, &published).await?,
                })
            })
            .await
    }

    /// Removes the published versions in scope. Drafts remain.
    #[tracing::instrument(skip_all, fields(content_type = %self.content_type.uid, %document_id))]
    pub async fn unpublish(
        &self,
        document_id: &DocumentId,
        params: PublishParams,
    ) -> Result<PublishResult> {
        let scope = self.scope_or_default(params.locale);

        self.db
            .transaction(async |tx| {
                let published = tx
                    .query(
                        self.select_scope(document_id, &scope)
                            .and(Expr::is_not_null(columns::PUBLISHED_AT)),
                    )
                    .await?;

                if published.is_empty() {
                    return Err(self.not_found(document_id, &scope, Some(Status::Published)));
                }

                let entries = self.versions(tx, &published).await?;

                CascadePlan::for_versions(tx, self.content_type, ids(&published)?)
                    .await?
                    .execute(tx)
                    .await?;

                Ok(PublishResult {
                    document_id: document_id.clone(),
                    entries,
                })
            })
            .await
    }

    /// Resets every draft in scope to a copy of its published version.
    #[tracing::instrument(skip_all, fields(content_type = %self.content_type.uid, %document_id))]
    pub async fn discard_draft(
        &self,
        document_id: &DocumentId,
        params: PublishParams,
    ) -> Result<PublishResult> {
        let scope = self.scope_or_default(params.locale);

        self.db
            .transaction(async |tx| {
                let published = tx
                    .query(
                        self.select_scope(document_id, &scope)
                            .and(Expr::is_not_null(columns::PUBLISHED_AT)),
                    )
                    .await?;

                if published.is_empty() {
                    return Err(self.not_found(document_id, &scope, Some(Status::Published)));
                }

                let mut drafts = Vec::with_capacity(published.len());
                for row in &published {
                    let locale = row.get(columns::LOCALE).to_opt_string()?;
                    let existing = tx
                        .query(
                            self.select_document(document_id)
                                .and(locale_expr(locale.as_deref()))
                                .and(Expr::is_null(columns::PUBLISHED_AT)),
                        )
                        .await?;

                    CascadePlan::for_versions(tx, self.content_type, ids(&existing)?)
                        .await?
                        .execute(tx)
                        .await?;

                    drafts.push(copy_version(tx, self.content_type, row, None).await?);
                }

                Ok(PublishResult {
                    document_id: document_id.clone(),
                    entries: self.versions(tx, &drafts).await?,
                })
            })
            .await
    }

    /// The version of a document matching `params`, if any.
    #[tracing::instrument(skip_all, fields(content_type = %self.content_type.uid, %document_id))]
    pub async fn find_one(
        &self,
        document_id: &DocumentId,
        params: FindParams,
    ) -> Result<Option<DocumentVersion>> {
        let select = self
            .select_find(&params)?
            .and(Expr::eq(columns::DOCUMENT_ID, document_id))
            .limit(1);

        let rows = self.db.query(select).await?;
        Ok(self.versions(self.db, &rows).await?.pop())
    }

    #[tracing::instrument(skip_all, fields(content_type = %self.content_type.uid))]
    pub async fn find_many(&self, params: FindParams) -> Result<Vec<DocumentVersion>> {
        let rows = self.db.query(self.select_find(&params)?).await?;
        self.versions(self.db, &rows).await
    }

    /// Number of versions matching `params`.
    pub async fn count(&self, params: FindParams) -> Result<u64> {
        let rows = self.db.query(self.select_find(&params)?).await?;
        Ok(rows.len() as u64)
    }

    async fn insert_draft(
        &self,
        tx: &Db,
        document_id: &DocumentId,
        locale: Option<String>,
        input: Input,
    ) -> Result<Row> {
        let now = Utc::now();
        let Input {
            scalars,
            components,
            ..
        } = input;

        let mut row = Row::new()
            .with(columns::DOCUMENT_ID, document_id)
            .with(columns::LOCALE, locale)
            .with(columns::PUBLISHED_AT, Value::Null)
            .with(columns::CREATED_AT, now)
            .with(columns::UPDATED_AT, now);

        for (column, value) in scalars {
            row.insert(column, value);
        }

        let draft = insert_row(tx, &self.content_type.table, row).await?;

        if !components.is_empty() {
            let id = draft.get_i64(columns::ID)?;
            insert_components(tx, self.content_type.join_table(), id, components).await?;
        }

        Ok(draft)
    }

    async fn update_draft(&self, tx: &Db, draft: Row, input: Input) -> Result<Row> {
        let id = draft.get_i64(columns::ID)?;
        let Input {
            mut scalars,
            fields,
            components,
        } = input;

        scalars.insert(columns::UPDATED_AT, Utc::now());

        let Some(row) = tx
            .exec(Update::new(&self.content_type.table, scalars, Expr::eq(columns::ID, id)).returning())
            .await?
            .into_values()?
            .pop()
        else {
            return Err(err!("draft vanished during update; table={}; id={id}", self.content_type.table));
        };

        for field in &fields {
            CascadePlan::for_field(tx, self.content_type, id, field)
                .await?
                .execute(tx)
                .await?;
        }

        if !components.is_empty() {
            insert_components(tx, self.content_type.join_table(), id, components).await?;
        }

        Ok(row)
    }

    /// Replaces the published version of the draft's locale with a fresh
    /// copy of the draft.
    async fn publish_draft(&self, tx: &Db, draft: &Row) -> Result<Row> {
        let locale = draft.get(columns::LOCALE).to_opt_string()?;
        let document_id = draft.get_string(columns::DOCUMENT_ID)?;

        let published = tx
            .query(
                Select::new(
                    &self.content_type.table,
                    Expr::eq(columns::DOCUMENT_ID, &document_id),
                )
                .and(locale_expr(locale.as_deref()))
                .and(Expr::is_not_null(columns::PUBLISHED_AT)),
            )
            .await?;

        if !published.is_empty() {
            CascadePlan::for_versions(tx, self.content_type, ids(&published)?)
                .await?
                .execute(tx)
                .await?;
        }

        copy_version(tx, self.content_type, draft, Some(Utc::now())).await
    }

    async fn version(&self, db: &Db, row: &Row) -> Result<DocumentVersion> {
        let join_rows = join_rows(db, self.content_type, &[row.get_i64(columns::ID)?]).await?;
        DocumentVersion::from_rows(self.content_type, row, &join_rows)
    }

    async fn versions(&self, db: &Db, rows: &[Row]) -> Result<Vec<DocumentVersion>> {
        let join_rows = join_rows(db, self.content_type, &ids(rows)?).await?;

        rows.iter()
            .map(|row| DocumentVersion::from_rows(self.content_type, row, &join_rows))
            .collect()
    }

    /// Stored locale for a write: `None` for non-localized content types.
    fn locale_value(&self, locale: Option<String>) -> Option<String> {
        if !self.content_type.localized {
            return None;
        }

        Some(locale.unwrap_or_else(|| self.db.config().default_locale.clone()))
    }

    fn scope_or_default(&self, scope: Option<LocaleScope>) -> LocaleScope {
        scope.unwrap_or_else(|| LocaleScope::Locale(self.db.config().default_locale.clone()))
    }

    fn select_document(&self, document_id: &DocumentId) -> Select {
        Select::new(
            &self.content_type.table,
            Expr::eq(columns::DOCUMENT_ID, document_id),
        )
        .order_by(OrderBy::asc(columns::ID))
    }

    fn select_scope(&self, document_id: &DocumentId, scope: &LocaleScope) -> Select {
        let select = self.select_document(document_id);

        match self.scope_expr(scope) {
            Some(expr) => select.and(expr),
            None => select,
        }
    }

    /// Locale restriction of a scope. Non-localized content types ignore it.
    fn scope_expr(&self, scope: &LocaleScope) -> Option<Expr> {
        match scope {
            LocaleScope::Locale(locale) if self.content_type.localized => {
                Some(Expr::eq(columns::LOCALE, locale))
            }
            _ => None,
        }
    }

    fn select_find(&self, params: &FindParams) -> Result<Select> {
        let scope = self.scope_or_default(params.locale.clone());

        let mut select = Select::all(&self.content_type.table)
            .and(match params.status.unwrap_or(Status::Draft) {
                Status::Draft => Expr::is_null(columns::PUBLISHED_AT),
                Status::Published => Expr::is_not_null(columns::PUBLISHED_AT),
            })
            .order_by(OrderBy::asc(columns::ID));

        if let Some(expr) = self.scope_expr(&scope) {
            select = select.and(expr);
        }

        for (name, value) in &params.filters {
            let Some(Attribute::Scalar(scalar)) = self.content_type.attribute(name) else {
                return Err(Error::validation(format!(
                    "Cannot filter on attribute `{name}`"
                )));
            };

            select = select.and(match scalar.ty.coerce(name, value)? {
                Value::Null => Expr::is_null(&scalar.column),
                value => Expr::eq(&scalar.column, value),
            });
        }

        Ok(select)
    }

    fn not_found(&self, document_id: &DocumentId, scope: &LocaleScope, status: Option<Status>) -> Error {
        let mut message = format!("document `{document_id}` of `{}`", self.content_type.uid);

        if let LocaleScope::Locale(locale) = scope {
            message.push_str(&format!(" in locale `{locale}`"));
        }

        match status {
            Some(Status::Draft) => message.push_str(" has no draft"),
            Some(Status::Published) => message.push_str(" has no published version"),
            None => {}
        }

        Error::record_not_found(message)
    }
}

fn locale_expr(locale: Option<&str>) -> Expr {
    match locale {
        Some(locale) => Expr::eq(columns::LOCALE, locale),
        None => Expr::is_null(columns::LOCALE),
    }
}

fn ids(rows: &[Row]) -> Result<Vec<i64>> {
    rows.iter().map(|row| row.get_i64(columns::ID)).collect()
}
