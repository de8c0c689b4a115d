use tests::prelude::*;
use tests::prelude::assert_eq;

async fn update_scalars(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(json!({ "title": "Before", "views": 7 })))
        .await
        .unwrap();

    let updated = articles
        .update(&draft.document_id, UpdateParams::new(json!({ "title": "After" })))
        .await
        .unwrap();

    assert_eq!(updated.id, draft.id);
    assert_eq!(updated.fields["title"], json!("After"));
    assert_eq!(updated.fields["views"], json!(7));
    assert_eq!(articles.count(FindParams::default()).await.unwrap(), 1);
}

async fn update_rewrites_present_components(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(article_data("Components")))
        .await
        .unwrap();

    let updated = articles
        .update(
            &draft.document_id,
            UpdateParams::new(json!({ "links": [{ "url": "https://example.com/new" }] })),
        )
        .await
        .unwrap();

    let links: Vec<_> = updated
        .components
        .iter()
        .filter(|c| c.field == "links")
        .collect();
    assert_eq!(links.len(), 1);
    assert!(draft.components.iter().all(|c| c.id != links[0].id || c.field != "links"));

    // seo and blocks were not part of the update
    assert_eq!(updated.dynamic_zones, draft.dynamic_zones);
    assert_eq!(
        updated.components.iter().find(|c| c.field == "seo"),
        draft.components.iter().find(|c| c.field == "seo")
    );

    let counts = row_counts(&db).await;
    assert_eq!(counts["articles_cmps"], 4);
    assert_eq!(counts["components_shared_links"], 2);
    assert_integrity(&db).await;
}

async fn update_clears_components(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(article_data("Components")))
        .await
        .unwrap();

    let updated = articles
        .update(
            &draft.document_id,
            UpdateParams::new(json!({ "seo": null, "blocks": [] })),
        )
        .await
        .unwrap();

    assert!(updated.components.iter().all(|c| c.field == "links"));
    assert!(updated.dynamic_zones.is_empty());

    let counts = row_counts(&db).await;
    assert_eq!(counts["components_shared_seos"], 0);
    assert_eq!(counts["components_shared_quotes"], 0);
    assert_eq!(counts["components_shared_heroes"], 0);
    assert_eq!(counts["components_shared_heroes_cmps"], 0);
    assert_eq!(counts["components_shared_links"], 2);
    assert_integrity(&db).await;
}

async fn update_creates_localization(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let en = articles
        .create(CreateParams::new(json!({ "title": "Hello" })))
        .await
        .unwrap();

    let fr = articles
        .update(
            &en.document_id,
            UpdateParams::new(json!({ "title": "Bonjour" })).locale("fr"),
        )
        .await
        .unwrap();

    assert_eq!(fr.document_id, en.document_id);
    assert_eq!(fr.locale.as_deref(), Some("fr"));
    assert_ne!(fr.id, en.id);

    let en_again = assert_some!(articles
        .find_one(&en.document_id, FindParams::default())
        .await
        .unwrap());
    assert_eq!(en_again.fields["title"], json!("Hello"));

    assert_eq!(
        articles
            .count(FindParams::default().locale(LocaleScope::All))
            .await
            .unwrap(),
        2
    );
}

async fn new_localization_needs_required_attributes(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let en = articles
        .create(CreateParams::new(json!({ "title": "Hello" })))
        .await
        .unwrap();

    let err = assert_err!(
        articles
            .update(
                &en.document_id,
                UpdateParams::new(json!({ "views": 2 })).locale("fr"),
            )
            .await
    );
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Attribute `title` is required");
}

async fn update_missing_document(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let err = assert_err!(
        articles
            .update(
                &DocumentId::from("missing"),
                UpdateParams::new(json!({ "title": "x" })),
            )
            .await
    );
    assert!(err.is_record_not_found());
    assert_eq!(row_counts(&db).await["articles"], 0);
}

async fn writes_publish_without_draft_and_publish(db: TestDb) {
    let homepages = db.documents(HOMEPAGE).unwrap();

    let published = homepages
        .create(CreateParams::new(json!({
            "headline": "Welcome",
            "hero": { "heading": "Hi", "cta": [{ "url": "/start" }] },
        })))
        .await
        .unwrap();

    assert_eq!(published.status, Status::Published);
    assert_none!(published.locale);

    let counts = row_counts(&db).await;
    assert_eq!(counts["homepages"], 2);
    assert_eq!(counts["components_shared_heroes"], 2);
    assert_eq!(counts["components_shared_links"], 2);

    let republished = homepages
        .update(
            &published.document_id,
            UpdateParams::new(json!({ "headline": "Welcome back" })),
        )
        .await
        .unwrap();

    assert_eq!(republished.status, Status::Published);
    assert_eq!(republished.fields["headline"], json!("Welcome back"));
    assert_ne!(republished.id, published.id);

    let live = assert_some!(homepages
        .find_one(
            &published.document_id,
            FindParams::default().status(Status::Published)
        )
        .await
        .unwrap());
    assert_eq!(live.id, republished.id);

    // a non-localized type ignores the requested locale
    assert_some!(homepages
        .find_one(&published.document_id, FindParams::default().locale("de"))
        .await
        .unwrap());

    assert_eq!(row_counts(&db).await, counts);
    assert_integrity(&db).await;
}

tests!(
    update_scalars,
    update_rewrites_present_components,
    update_clears_components,
    update_creates_localization,
    new_localization_needs_required_attributes,
    update_missing_document,
    writes_publish_without_draft_and_publish,
);
