//! Product records as they live in the store.
//!
//! Only `id` and `tags` carry meaning for the catalog. Every other field is
//! kept verbatim in [`Product::fields`] and written back unchanged.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{CatalogError, CatalogResult};

/// Identifier of a product. Stores may use numeric or string ids.
///
/// Integers that fit an `i64` land in `Int`; any other JSON number (floats,
/// large unsigned values) is kept as written in `Number`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Number(Number),
    Text(String),
}

impl ProductId {
    /// Fresh random id used when a create request omits one.
    pub fn generate() -> Self {
        ProductId::Text(uuid::Uuid::new_v4().to_string())
    }

    /// Whether this id is addressed by the given path segment.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            ProductId::Int(n) => raw.parse::<i64>().is_ok_and(|parsed| parsed == *n),
            ProductId::Number(n) => {
                raw == n.to_string() || raw.parse::<Number>().is_ok_and(|parsed| parsed == *n)
            }
            ProductId::Text(s) => s == raw,
        }
    }

    /// Whether two ids would be reachable through the same path segment.
    pub fn collides_with(&self, other: &ProductId) -> bool {
        self == other || self.matches(&other.to_string()) || other.matches(&self.to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(n) => write!(f, "{n}"),
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        ProductId::Int(value)
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        ProductId::Int(value.into())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        ProductId::Text(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        ProductId::Text(value.to_string())
    }
}

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Tag set in store order. Matching is exact and case-sensitive.
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,

    /// Descriptive fields opaque to the catalog.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// `null` and a missing key both mean "no tags".
fn nullable_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    pub fn new(id: impl Into<ProductId>, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            fields: Map::new(),
        }
    }

    /// Builder-style helper for attaching an opaque field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Build a product from a create request body, assigning an id when the
    /// body carries none.
    pub fn from_json(body: Value) -> CatalogResult<Self> {
        let Value::Object(mut object) = body else {
            return Err(CatalogError::invalid_product("body must be a JSON object"));
        };
        if object.get("id").is_none_or(Value::is_null) {
            let id = serde_json::to_value(ProductId::generate())
                .map_err(|e| CatalogError::invalid_product(e.to_string()))?;
            object.insert("id".to_string(), id);
        }
        serde_json::from_value(Value::Object(object))
            .map_err(|e| CatalogError::invalid_product(e.to_string()))
    }

    /// Shallow-merge `patch` into this product. `id` is immutable.
    pub fn apply_patch(&mut self, patch: Value) -> CatalogResult<()> {
        let Value::Object(patch) = patch else {
            return Err(CatalogError::invalid_product("body must be a JSON object"));
        };

        if let Some(id) = patch.get("id") {
            let requested: ProductId = serde_json::from_value(id.clone())
                .map_err(|e| CatalogError::invalid_product(format!("id: {e}")))?;
            if !requested.collides_with(&self.id) {
                return Err(CatalogError::invalid_product(format!(
                    "id cannot be changed from {} to {requested}",
                    self.id
                )));
            }
        }

        // Validate before touching `self` so a rejected patch leaves no trace.
        let tags = match patch.get("tags") {
            Some(value) => Some(
                serde_json::from_value::<Option<Vec<String>>>(value.clone())
                    .map_err(|e| CatalogError::invalid_product(format!("tags: {e}")))?
                    .unwrap_or_default(),
            ),
            None => None,
        };

        if let Some(tags) = tags {
            self.tags = tags;
        }
        for (key, value) in patch {
            if key != "id" && key != "tags" {
                self.fields.insert(key, value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn opaque_fields_pass_through() {
        let raw = json!({
            "id": "abc",
            "description": "Mug",
            "tags": ["kitchen"],
            "urls": {"regular": "https://example.com/mug.jpg"},
            "likes": 3
        });
        let product: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(product.id, ProductId::from("abc"));
        assert_eq!(product.tags, vec!["kitchen"]);
        assert_eq!(product.fields["likes"], json!(3));

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["urls"]["regular"], "https://example.com/mug.jpg");
        assert_eq!(back["description"], "Mug");
    }

    #[test]
    fn missing_tags_is_empty_set() {
        let product: Product = serde_json::from_value(json!({"id": 7})).unwrap();
        assert!(product.tags.is_empty());
        assert!(!product.has_tag(""));
    }

    #[test]
    fn null_tags_is_empty_set() {
        let product: Product = serde_json::from_value(json!({"id": 7, "tags": null})).unwrap();
        assert!(product.tags.is_empty());
    }

    #[test]
    fn any_json_number_is_a_valid_id() {
        let big: Product =
            serde_json::from_value(json!({"id": 18446744073709551615u64, "tags": []})).unwrap();
        assert!(matches!(big.id, ProductId::Number(_)));
        assert!(big.id.matches("18446744073709551615"));
        assert_eq!(serde_json::to_value(&big).unwrap()["id"], json!(18446744073709551615u64));

        let float: Product = serde_json::from_value(json!({"id": 1.5})).unwrap();
        assert!(float.id.matches("1.5"));
        assert!(!float.id.matches("1"));
        assert_eq!(serde_json::to_value(&float).unwrap()["id"], json!(1.5));
    }

    #[test]
    fn ids_collide_across_representations() {
        assert!(ProductId::from("1").collides_with(&ProductId::Int(1)));
        assert!(ProductId::Int(1).collides_with(&ProductId::from("01")));
        assert!(!ProductId::from("a").collides_with(&ProductId::from("b")));
    }

    #[test]
    fn tag_match_is_case_sensitive() {
        let product = Product::new(1, ["Outdoor"]);
        assert!(product.has_tag("Outdoor"));
        assert!(!product.has_tag("outdoor"));
    }

    #[test]
    fn numeric_ids_match_path_segments() {
        let id = ProductId::Int(42);
        assert!(id.matches("42"));
        assert!(!id.matches("042x"));
        assert!(ProductId::from("42").matches("42"));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn from_json_assigns_missing_id() {
        let product = Product::from_json(json!({"tags": ["a"], "name": "x"})).unwrap();
        assert!(matches!(product.id, ProductId::Text(ref s) if !s.is_empty()));
        assert_eq!(product.fields["name"], "x");
    }

    #[test]
    fn from_json_rejects_non_objects_and_bad_tags() {
        assert!(matches!(
            Product::from_json(json!([1, 2])),
            Err(CatalogError::InvalidProduct(_))
        ));
        assert!(matches!(
            Product::from_json(json!({"id": 1, "tags": "a"})),
            Err(CatalogError::InvalidProduct(_))
        ));
    }

    #[test]
    fn patch_merges_and_keeps_id() {
        let mut product = Product::new(1, ["a"]).with_field("name", "old");
        product
            .apply_patch(json!({"name": "new", "tags": ["b"], "price": 5}))
            .unwrap();
        assert_eq!(product.id, ProductId::Int(1));
        assert_eq!(product.tags, vec!["b"]);
        assert_eq!(product.fields["name"], "new");
        assert_eq!(product.fields["price"], 5);
    }

    #[test]
    fn patch_accepts_same_id_in_other_form() {
        let mut product = Product::new(1, ["a"]);
        product.apply_patch(json!({"id": "1", "tags": null})).unwrap();
        assert_eq!(product.id, ProductId::Int(1));
        assert!(product.tags.is_empty());
    }

    #[test]
    fn rejected_patch_leaves_product_untouched() {
        let mut product = Product::new(1, ["a"]).with_field("name", "old");
        let before = product.clone();
        assert!(product.apply_patch(json!({"name": "new", "tags": [1]})).is_err());
        assert!(product.apply_patch(json!({"id": 2})).is_err());
        assert_eq!(product, before);
    }
}
