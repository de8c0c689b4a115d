use tests::prelude::*;
use tests::prelude::assert_eq;

async fn delete_every_version(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let en = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
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
        .delete(&en.document_id, DeleteParams::default())
        .await
        .unwrap();

    assert_eq!(result.document_id, en.document_id);
    assert_eq!(result.entries.len(), 3);

    for (table, count) in row_counts(&db).await {
        assert_eq!(count, 0, "{table}");
    }
}

async fn delete_one_locale(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let en = articles
        .create(CreateParams::new(article_data("Hello")))
        .await
        .unwrap();
    let before = row_counts(&db).await;

    articles
        .update(
            &en.document_id,
            UpdateParams::new(article_data("Bonjour")).locale("fr"),
        )
        .await
        .unwrap();
    articles
        .publish(&en.document_id, PublishParams::default().locale("fr"))
        .await
        .unwrap();

    let result = articles
        .delete(&en.document_id, DeleteParams::default().locale("fr"))
        .await
        .unwrap();

    let statuses: Vec<_> = result.entries.iter().map(|v| v.status).collect();
    assert_eq!(statuses, [Status::Draft, Status::Published]);
    assert!(result.entries.iter().all(|v| v.locale.as_deref() == Some("fr")));

    let en_again = assert_some!(articles
        .find_one(&en.document_id, FindParams::default())
        .await
        .unwrap());
    assert_eq!(en_again, en);

    assert_eq!(row_counts(&db).await, before);
    assert_integrity(&db).await;
}

async fn deleting_drafts_is_rejected(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(article_data("Hello")))
        .await
        .unwrap();
    let before = row_counts(&db).await;

    let err = assert_err!(
        articles
            .delete(
                &draft.document_id,
                DeleteParams::default().status(Status::Draft)
            )
            .await
    );
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Cannot delete a draft document");

    assert_eq!(row_counts(&db).await, before);
}

async fn delete_published_keeps_drafts(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let published = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();
    let draft = assert_some!(articles
        .find_one(&published.document_id, FindParams::default())
        .await
        .unwrap());

    let result = articles
        .delete(
            &published.document_id,
            DeleteParams::default().status(Status::Published),
        )
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

    let draft_again = assert_some!(articles
        .find_one(&published.document_id, FindParams::default())
        .await
        .unwrap());
    assert_eq!(draft_again, draft);

    assert_integrity(&db).await;
}

async fn delete_published_in_one_locale(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let en_published = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();
    let id = en_published.document_id.clone();
    articles
        .update(&id, UpdateParams::new(article_data("Bonjour")).locale("fr"))
        .await
        .unwrap();
    articles
        .publish(&id, PublishParams::default().locale("fr"))
        .await
        .unwrap();

    let find = async |locale: &str, status: Status| {
        articles
            .find_one(&id, FindParams::default().locale(locale).status(status))
            .await
            .unwrap()
    };
    let fr_draft = assert_some!(find("fr", Status::Draft).await);
    let en_draft = assert_some!(find("en", Status::Draft).await);
    assert_eq!(assert_some!(find("en", Status::Published).await), en_published);
    let fr_published = assert_some!(find("fr", Status::Published).await);
    let before = row_counts(&db).await;

    let result = articles
        .delete(
            &id,
            DeleteParams::default().locale("fr").status(Status::Published),
        )
        .await
        .unwrap();

    assert_eq!(result.entries, [fr_published]);

    assert_none!(find("fr", Status::Published).await);
    assert_eq!(assert_some!(find("fr", Status::Draft).await), fr_draft);
    assert_eq!(assert_some!(find("en", Status::Draft).await), en_draft);
    assert_eq!(assert_some!(find("en", Status::Published).await), en_published);

    let after = row_counts(&db).await;
    assert_eq!(after["articles"], before["articles"] - 1);
    assert_integrity(&db).await;
}

async fn delete_without_match_is_not_found(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(json!({ "title": "Hello" })))
        .await
        .unwrap();
    let before = row_counts(&db).await;

    let err = assert_err!(
        articles
            .delete(&DocumentId::from("missing"), DeleteParams::default())
            .await
    );
    assert!(err.is_record_not_found());

    let err = assert_err!(
        articles
            .delete(&draft.document_id, DeleteParams::default().locale("de"))
            .await
    );
    assert!(err.is_record_not_found());

    let err = assert_err!(
        articles
            .delete(
                &draft.document_id,
                DeleteParams::default().status(Status::Published)
            )
            .await
    );
    assert!(err.is_record_not_found());

    assert_eq!(row_counts(&db).await, before);
}

tests!(
    delete_every_version,
    delete_one_locale,
    deleting_drafts_is_rejected,
    delete_published_keeps_drafts,
    delete_published_in_one_locale,
    delete_without_match_is_not_found,
);
