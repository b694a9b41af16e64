use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use storefront_core::{Entity, ProductId};

/// Category reference as sent by the backend.
///
/// Older records carry a plain label, newer ones embed the category document.
/// Anything else is kept verbatim so one odd record never fails the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
    Other(JsonValue),
}

impl CategoryRef {
    /// Raw label, if the reference carries one.
    pub fn label(&self) -> Option<&str> {
        match self {
            CategoryRef::Name(name) => Some(name),
            CategoryRef::Object { name } => name.as_deref(),
            CategoryRef::Other(_) => None,
        }
    }
}

impl From<&str> for CategoryRef {
    fn from(value: &str) -> Self {
        CategoryRef::Name(value.to_string())
    }
}

/// Lower-cased, trimmed category key used for filter matching.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Product as loaded from the product source. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id", deserialize_with = "checked_id")]
    id: ProductId,
    #[serde(default, deserialize_with = "lenient_name")]
    name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    price: Option<f64>,
    #[serde(default, rename = "categories", alias = "category")]
    category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "lenient_flag")]
    featured: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Some(price),
            category: None,
            featured: false,
            created_at: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<CategoryRef>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price, or `None` when the record carried no usable number.
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn category(&self) -> Option<&CategoryRef> {
        self.category.as_ref()
    }

    /// Normalized category key; empty when the category is missing or unreadable.
    pub fn category_key(&self) -> String {
        self.category
            .as_ref()
            .and_then(CategoryRef::label)
            .map(normalize_category)
            .unwrap_or_default()
    }

    pub fn is_featured(&self) -> bool {
        self.featured
    }

    /// Creation time, or `None` when missing or unparseable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Parse a backend timestamp: RFC 3339, a naive date-time (UTC) or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(JsonValue::String(s)) => parse_timestamp(&s),
        // Epoch milliseconds.
        Some(JsonValue::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

/// Ids must be non-blank strings; a record without one is rejected.
fn checked_id<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(JsonValue::String(s)) => s,
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Truthy flag: `true`, `"true"`/`"1"` or a non-zero number. Everything else is `false`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(JsonValue::Bool(b)) => b,
        Some(JsonValue::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        Some(JsonValue::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    })
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    let price = match raw {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(price.filter(|p| p.is_finite()))
}
