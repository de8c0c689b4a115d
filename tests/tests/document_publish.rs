use tests::prelude::*;
use tests::prelude::assert_eq;

use vellum::{ComponentRef, DocumentVersion};

/// Component attributes of a version, without row ids.
fn shape(version: &DocumentVersion) -> Vec<(String, String, i64)> {
    version
        .components
        .iter()
        .chain(&version.dynamic_zones)
        .map(|c: &ComponentRef| (c.field.clone(), c.component.clone(), c.order))
        .collect()
}

async fn publish_copies_components(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(article_data("Hello")))
        .await
        .unwrap();

    let result = articles
        .publish(&draft.document_id, PublishParams::default())
        .await
        .unwrap();

    assert_eq!(result.document_id, draft.document_id);
    let [published] = &result.entries[..] else {
        panic!("expected one published version; got={:#?}", result.entries);
    };

    assert_eq!(published.status, Status::Published);
    assert_some!(published.published_at);
    assert_ne!(published.id, draft.id);
    assert_eq!(published.fields, draft.fields);
    assert_eq!(shape(published), shape(&draft));

    for (a, b) in published.components.iter().zip(&draft.components) {
        assert_ne!(a.id, b.id);
    }

    let counts = row_counts(&db).await;
    assert_eq!(counts["articles"], 2);
    assert_eq!(counts["articles_cmps"], 10);
    assert_eq!(counts["components_shared_seos"], 2);
    assert_eq!(counts["components_shared_links"], 6);
    assert_eq!(counts["components_shared_heroes_cmps"], 2);

    assert_integrity(&db).await;
}

async fn republish_replaces_published_version(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let first = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();
    let before = row_counts(&db).await;

    articles
        .update(
            &first.document_id,
            UpdateParams::new(json!({ "title": "Changed" })),
        )
        .await
        .unwrap();
    let result = articles
        .publish(&first.document_id, PublishParams::default())
        .await
        .unwrap();

    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].fields["title"], json!("Changed"));
    assert_ne!(result.entries[0].id, first.id);

    let published = articles
        .find_many(FindParams::default().status(Status::Published))
        .await
        .unwrap();
    assert_eq!(published, result.entries);

    assert_eq!(row_counts(&db).await, before);
    assert_integrity(&db).await;
}

async fn deleting_published_keeps_draft_components(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let published = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();

    articles
        .delete(
            &published.document_id,
            DeleteParams::default().status(Status::Published),
        )
        .await
        .unwrap();

    let counts = row_counts(&db).await;
    assert_eq!(counts["articles"], 1);
    assert_eq!(counts["articles_cmps"], 5);
    assert_eq!(counts["components_shared_links"], 3);
    assert_eq!(counts["components_shared_heroes_cmps"], 1);

    assert_integrity(&db).await;
}

async fn publish_without_draft(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let err = assert_err!(
        articles
            .publish(&DocumentId::from("missing"), PublishParams::default())
            .await
    );
    assert!(err.is_record_not_found());

    let draft = articles
        .create(CreateParams::new(json!({ "title": "Hello" })))
        .await
        .unwrap();

    let err = assert_err!(
        articles
            .publish(&draft.document_id, PublishParams::default().locale("fr"))
            .await
    );
    assert!(err.is_record_not_found());
    assert_eq!(
        err.to_string(),
        format!(
            "record not found: document `{}` of `{ARTICLE}` in locale `fr` has no draft",
            draft.document_id
        )
    );
}

async fn publish_every_locale(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let en = articles
        .create(CreateParams::new(article_data("Hello")))
        .await
        .unwrap();
    articles
        .update(
            &en.document_id,
            UpdateParams::new(article_data("Bonjour")).locale("fr"),
        )
        .await
        .unwrap();

    let result = articles
        .publish(
            &en.document_id,
            PublishParams::default().locale(LocaleScope::All),
        )
        .await
        .unwrap();

    let locales: Vec<_> = result.entries.iter().map(|v| v.locale.as_deref()).collect();
    assert_eq!(locales, [Some("en"), Some("fr")]);
    assert!(result.entries.iter().all(|v| v.status == Status::Published));

    assert_eq!(row_counts(&db).await["articles"], 4);
    assert_integrity(&db).await;
}

async fn unpublish_removes_published_version(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let published = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();

    let result = articles
        .unpublish(&published.document_id, PublishParams::default())
        .await
        .unwrap();
    assert_eq!(result.entries, [published.clone()]);

    assert_none!(articles
        .find_one(
            &published.document_id,
            FindParams::default().status(Status::Published)
        )
        .await
        .unwrap());
    assert_some!(articles
        .find_one(&published.document_id, FindParams::default())
        .await
        .unwrap());

    let err = assert_err!(
        articles
            .unpublish(&published.document_id, PublishParams::default())
            .await
    );
    assert!(err.is_record_not_found());

    assert_eq!(row_counts(&db).await["articles"], 1);
    assert_integrity(&db).await;
}

async fn discard_draft_restores_published_content(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let published = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();
    let before = row_counts(&db).await;

    articles
        .update(
            &published.document_id,
            UpdateParams::new(json!({ "title": "Changed", "links": [], "blocks": [] })),
        )
        .await
        .unwrap();

    let result = articles
        .discard_draft(&published.document_id, PublishParams::default())
        .await
        .unwrap();

    let [draft] = &result.entries[..] else {
        panic!("expected one draft; got={:#?}", result.entries);
    };
    assert_eq!(draft.status, Status::Draft);
    assert_none!(draft.published_at);
    assert_eq!(draft.fields, published.fields);
    assert_eq!(shape(draft), shape(&published));

    assert_eq!(row_counts(&db).await, before);
    assert_integrity(&db).await;
}

async fn discard_draft_without_published_version(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(article_data("Hello")))
        .await
        .unwrap();
    let before = row_counts(&db).await;

    let err = assert_err!(
        articles
            .discard_draft(&draft.document_id, PublishParams::default())
            .await
    );
    assert!(err.is_record_not_found());

    assert_eq!(row_counts(&db).await, before);
}

tests!(
    publish_copies_components,
    republish_replaces_published_version,
    deleting_published_keeps_draft_components,
    publish_without_draft,
    publish_every_locale,
    unpublish_removes_published_version,
    discard_draft_restores_published_content,
    discard_draft_without_published_version,
);
