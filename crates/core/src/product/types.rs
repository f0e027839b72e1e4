//! Product records returned by the recommendation backend.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Canonical product identifier.
///
/// Some backend versions send numeric ids and others send strings; both
/// are accepted on input and stored as a string from then on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ProductId(s),
            RawId::Unsigned(n) => ProductId(n.to_string()),
            RawId::Signed(n) => ProductId(n.to_string()),
        })
    }
}

/// Stock state reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    InStock,
    OutOfStock,
}

/// One entry of a product's image map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductImage {
    Url(String),
    Variants(ImageVariants),
}

impl ProductImage {
    /// Best URL to render: `hi_res`, then `large`, then `thumb`, then `url`.
    pub fn best_url(&self) -> Option<&str> {
        match self {
            ProductImage::Url(url) => Some(url.as_str()).filter(|u| !u.is_empty()),
            ProductImage::Variants(v) => [&v.hi_res, &v.large, &v.thumb, &v.url]
                .into_iter()
                .filter_map(|u| u.as_deref())
                .find(|u| !u.is_empty()),
        }
    }
}

/// Size variants of a single product image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageVariants {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi_res: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// What to show where a price would go.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceDisplay {
    Price {
        amount: f64,
        currency: Option<String>,
    },
    /// Offer a restock notification instead of a price.
    RestockNotice,
}

/// A recommended product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Keyed by name; a JSON array arrives keyed by position ("0", "1", ...).
    #[serde(default, deserialize_with = "map_or_list")]
    pub images: HashMap<String, ProductImage>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_number: Option<u64>,
    /// Backend-supplied justification for the recommendation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: serde_json::Map<String, serde_json::Value>,
    /// Missing on some payloads; the search client fills it from the list
    /// the product arrived in.
    #[serde(default, alias = "stock_status")]
    pub inventory_status: Option<InventoryStatus>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub store: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl Product {
    /// Price when one is present and positive, otherwise a restock notice.
    ///
    /// Deliberately independent of `inventory_status`: the backend may
    /// price out-of-stock items and may omit prices for in-stock ones.
    pub fn price_display(&self) -> PriceDisplay {
        match self.price {
            Some(amount) if amount > 0.0 => PriceDisplay::Price {
                amount,
                currency: self.currency.clone(),
            },
            _ => PriceDisplay::RestockNotice,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.inventory_status == Some(InventoryStatus::InStock)
    }

    /// Renderable image URLs, positional entries first in index order,
    /// then named entries by name.
    pub fn image_urls(&self) -> Vec<&str> {
        let mut entries: Vec<(&String, &ProductImage)> = self.images.iter().collect();
        entries.sort_by(|(a, _), (b, _)| match (a.parse::<usize>(), b.parse::<usize>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        entries
            .into_iter()
            .filter_map(|(_, image)| image.best_url())
            .collect()
    }
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn map_or_list<'de, D>(deserializer: D) -> Result<HashMap<String, ProductImage>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawImages {
        Map(HashMap<String, Option<ProductImage>>),
        List(Vec<Option<ProductImage>>),
    }

    let images = match Option::<RawImages>::deserialize(deserializer)? {
        None => HashMap::new(),
        Some(RawImages::Map(map)) => map
            .into_iter()
            .filter_map(|(key, image)| image.map(|image| (key, image)))
            .collect(),
        Some(RawImages::List(list)) => list
            .into_iter()
            .enumerate()
            .filter_map(|(i, image)| image.map(|image| (i.to_string(), image)))
            .collect(),
    };
    Ok(images)
}

/// Accept a list, a single value, or an object (as `key: value` lines).
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, v)| scalar_text(v).map(|v| format!("{}: {}", key, v)))
            .collect(),
        other => scalar_text(other).into_iter().collect(),
    })
}

/// Accept a string, or a list of strings joined by a space.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_list(deserializer)?.join(" "))
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
