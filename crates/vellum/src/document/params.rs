use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Publication state of a document version.
///
/// Stored as `published_at`: null for drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Published,
}

/// Which locales an operation touches.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleScope {
    #[default]
    All,
    Locale(String),
}

impl LocaleScope {
    pub fn locale(code: impl Into<String>) -> LocaleScope {
        LocaleScope::Locale(code.into())
    }
}

impl From<&str> for LocaleScope {
    fn from(code: &str) -> Self {
        LocaleScope::Locale(code.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateParams {
    /// Defaults to the configured default locale
    pub locale: Option<String>,

    /// `Published` publishes the new draft right away
    pub status: Option<Status>,

    /// Attribute values, keyed by attribute name
    pub data: serde_json::Value,
}

impl CreateParams {
    pub fn new(data: serde_json::Value) -> CreateParams {
        CreateParams {
            data,
            ..Default::default()
        }
    }

    pub fn locale(mut self, locale: impl Into<String>) -> CreateParams {
        self.locale = Some(locale.into());
        self
    }

    pub fn status(mut self, status: Status) -> CreateParams {
        self.status = Some(status);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateParams {
    pub locale: Option<String>,

    /// Attributes to change. Component attributes present here replace the
    /// existing components of that attribute.
    pub data: serde_json::Value,
}

impl UpdateParams {
    pub fn new(data: serde_json::Value) -> UpdateParams {
        UpdateParams { locale: None, data }
    }

    pub fn locale(mut self, locale: impl Into<String>) -> UpdateParams {
        self.locale = Some(locale.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteParams {
    /// Every locale unless narrowed
    pub locale: LocaleScope,

    /// Only `Published` is accepted; drafts are never deleted on their own.
    pub status: Option<Status>,
}

impl DeleteParams {
    pub fn locale(mut self, locale: impl Into<LocaleScope>) -> DeleteParams {
        self.locale = locale.into();
        self
    }

    pub fn status(mut self, status: Status) -> DeleteParams {
        self.status = Some(status);
        self
    }
}

/// Locale scope of `publish`, `unpublish` and `discard_draft`. Defaults to
/// the configured default locale.
#[derive(Debug, Clone, Default)]
pub struct PublishParams {
    pub locale: Option<LocaleScope>,
}

impl PublishParams {
    pub fn locale(mut self, locale: impl Into<LocaleScope>) -> PublishParams {
        self.locale = Some(locale.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct FindParams {
    /// Defaults to the configured default locale
    pub locale: Option<LocaleScope>,

    /// Defaults to `Draft`
    pub status: Option<Status>,

    /// Equality filters on scalar attributes
    pub filters: IndexMap<String, serde_json::Value>,
}

impl FindParams {
    pub fn locale(mut self, locale: impl Into<LocaleScope>) -> FindParams {
        self.locale = Some(locale.into());
        self
    }

    pub fn status(mut self, status: Status) -> FindParams {
        self.status = Some(status);
        self
    }

    pub fn filter(mut self, attribute: impl Into<String>, value: serde_json::Value) -> FindParams {
        self.filters.insert(attribute.into(), value);
        self
    }
}
