use tests::prelude::*;
use tests::prelude::assert_eq;

async fn find_many_filters_on_scalars(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    for (title, views) in [("a", 1), ("b", 2), ("c", 2)] {
        articles
            .create(CreateParams::new(json!({ "title": title, "views": views })))
            .await
            .unwrap();
    }

    let popular = articles
        .find_many(FindParams::default().filter("views", json!(2)))
        .await
        .unwrap();

    let titles: Vec<_> = popular.iter().map(|v| v.fields["title"].clone()).collect();
    assert_eq!(titles, [json!("b"), json!("c")]);

    assert_eq!(
        articles
            .count(FindParams::default().filter("views", json!(1)))
            .await
            .unwrap(),
        1
    );

    let untitled = articles
        .find_many(FindParams::default().filter("body", json!(null)))
        .await
        .unwrap();
    assert_eq!(untitled.len(), 3);
}

async fn find_many_rejects_non_scalar_filters(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    let err = assert_err!(
        articles
            .find_many(FindParams::default().filter("seo", json!({})))
            .await
    );
    assert_eq!(err.to_string(), "Cannot filter on attribute `seo`");

    let err = assert_err!(
        articles
            .find_many(FindParams::default().filter("nope", json!(1)))
            .await
    );
    assert!(err.is_validation());
}

async fn locale_scopes(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    articles
        .create(CreateParams::new(json!({ "title": "en" })))
        .await
        .unwrap();
    articles
        .create(CreateParams::new(json!({ "title": "fr" })).locale("fr"))
        .await
        .unwrap();

    assert_eq!(articles.count(FindParams::default()).await.unwrap(), 1);
    assert_eq!(
        articles
            .count(FindParams::default().locale("fr"))
            .await
            .unwrap(),
        1
    );

    let all = articles
        .find_many(FindParams::default().locale(LocaleScope::All))
        .await
        .unwrap();
    let locales: Vec<_> = all.iter().map(|v| v.locale.as_deref()).collect();
    assert_eq!(locales, [Some("en"), Some("fr")]);
}

async fn find_one_missing(db: TestDb) {
    let articles = db.documents(ARTICLE).unwrap();

    assert_none!(articles
        .find_one(&DocumentId::from("missing"), FindParams::default())
        .await
        .unwrap());
}

tests!(
    find_many_filters_on_scalars,
    find_many_rejects_non_scalar_filters,
    locale_scopes,
    find_one_missing,
);
