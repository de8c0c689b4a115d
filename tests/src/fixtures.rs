use serde_json::json;
use vellum::{Component, ContentType, Registry, ScalarType};

/// Localized, draft & publish, with every kind of component attribute.
pub const ARTICLE: &str = "api::article.article";

/// Single-locale, published on every write.
pub const HOMEPAGE: &str = "api::homepage.homepage";

pub fn registry() -> Registry {
    Registry::builder()
        .content_type(
            ContentType::new(ARTICLE, "articles")
                .localized()
                .required("title", ScalarType::String)
                .scalar("body", ScalarType::Text)
                .scalar("views", ScalarType::Integer)
                .scalar("rating", ScalarType::Float)
                .scalar("featured", ScalarType::Boolean)
                .scalar("meta", ScalarType::Json)
                .scalar("releasedAt", ScalarType::DateTime)
                .component("seo", "shared.seo", false)
                .component("links", "shared.link", true)
                .dynamic_zone("blocks", ["shared.quote", "shared.hero"]),
        )
        .content_type(
            ContentType::new(HOMEPAGE, "homepages")
                .draft_and_publish(false)
                .scalar("headline", ScalarType::String)
                .component("hero", "shared.hero", false),
        )
        .component(
            Component::new("shared.seo", "components_shared_seos")
                .required("metaTitle", ScalarType::String)
                .scalar("metaDescription", ScalarType::Text),
        )
        .component(
            Component::new("shared.link", "components_shared_links")
                .scalar("label", ScalarType::String)
                .required("url", ScalarType::String),
        )
        .component(
            Component::new("shared.quote", "components_shared_quotes")
                .scalar("body", ScalarType::Text)
                .scalar("author", ScalarType::String),
        )
        .component(
            Component::new("shared.hero", "components_shared_heroes")
                .scalar("heading", ScalarType::String)
                .component("cta", "shared.link", true),
        )
        .build()
        .unwrap()
}

/// Article data touching every component table, nested heroes included.
pub fn article_data(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "views": 1,
        "seo": { "metaTitle": title },
        "links": [
            { "label": "one", "url": "https://example.com/1" },
            { "label": "two", "url": "https://example.com/2" },
        ],
        "blocks": [
            { "__component": "shared.quote", "body": "Quoted", "author": "Someone" },
            {
                "__component": "shared.hero",
                "heading": "Hero",
                "cta": [{ "url": "https://example.com/cta" }],
            },
        ],
    })
}
