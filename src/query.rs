//! Tag filtering and offset/limit pagination over the product list.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::product::Product;

pub const DEFAULT_OFFSET: usize = 0;
pub const DEFAULT_LIMIT: usize = 25;

/// Listing request: optional tag filter plus a page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for Query {
    fn default() -> Self {
        Self {
            tag: None,
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Build a query from raw query-string values.
    ///
    /// Blank values fall back to the defaults, fractions truncate, negatives
    /// clamp to zero and anything that is not a finite number is rejected.
    pub fn from_params(
        tag: Option<String>,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> CatalogResult<Self> {
        Ok(Self {
            tag: tag.filter(|t| !t.is_empty()),
            offset: coerce("offset", offset, DEFAULT_OFFSET)?,
            limit: coerce("limit", limit, DEFAULT_LIMIT)?,
        })
    }

    /// The tag filter, if any. An empty tag filters nothing.
    pub fn tag_filter(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }
}

fn coerce(name: &'static str, raw: Option<&str>, default: usize) -> CatalogResult<usize> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default);
    };
    let invalid = || CatalogError::InvalidParameter {
        name,
        value: raw.to_string(),
    };

    let number: f64 = raw.parse().map_err(|_| invalid())?;
    if !number.is_finite() {
        return Err(invalid());
    }
    // `as` saturates at usize::MAX, and negatives land on 0.
    Ok(number.trunc().max(0.0) as usize)
}

/// One page of the eligible set together with the eligible set's size.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    pub products: Vec<Product>,
    pub total: usize,
}

/// Apply the tag filter, count, then cut the `[offset, offset + limit)` window.
pub fn paginate(products: Vec<Product>, query: &Query) -> Page {
    let eligible: Vec<Product> = match query.tag_filter() {
        Some(tag) => products.into_iter().filter(|p| p.has_tag(tag)).collect(),
        None => products,
    };
    let total = eligible.len();

    let start = query.offset.min(total);
    let end = query.offset.saturating_add(query.limit).min(total);

    let products = eligible.into_iter().skip(start).take(end - start).collect();
    Page { products, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;

    fn store() -> Vec<Product> {
        vec![
            Product::new(1, ["a"]),
            Product::new(2, ["b"]),
            Product::new(3, ["a", "b"]),
        ]
    }

    fn ids(page: &Page) -> Vec<ProductId> {
        page.products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn tag_filter_keeps_store_order() {
        let page = paginate(store(), &Query::new().with_tag("a"));
        assert_eq!(ids(&page), vec![ProductId::Int(1), ProductId::Int(3)]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn window_without_tag() {
        let page = paginate(store(), &Query::new().with_offset(1).with_limit(1));
        assert_eq!(ids(&page), vec![ProductId::Int(2)]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn offset_past_end_is_empty_not_error() {
        let page = paginate(store(), &Query::new().with_offset(10).with_limit(5));
        assert!(page.products.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let page = paginate(
            store(),
            &Query::new().with_offset(usize::MAX).with_limit(usize::MAX),
        );
        assert!(page.products.is_empty());
        let page = paginate(store(), &Query::new().with_offset(2).with_limit(usize::MAX));
        assert_eq!(ids(&page), vec![ProductId::Int(3)]);
    }

    #[test]
    fn empty_tag_means_no_filter() {
        let page = paginate(store(), &Query::new().with_tag(""));
        assert_eq!(page.total, 3);
    }

    #[test]
    fn params_default_when_absent_or_blank() {
        let q = Query::from_params(None, None, Some("  ")).unwrap();
        assert_eq!(q, Query::default());
    }

    #[test]
    fn params_coerce_like_numbers() {
        let q = Query::from_params(Some("a".into()), Some("2.9"), Some("1e1")).unwrap();
        assert_eq!(q.offset, 2);
        assert_eq!(q.limit, 10);
        assert_eq!(q.tag.as_deref(), Some("a"));

        let q = Query::from_params(None, Some("-4"), Some("-1")).unwrap();
        assert_eq!((q.offset, q.limit), (0, 0));

        let q = Query::from_params(None, None, Some("1e300")).unwrap();
        assert_eq!(q.limit, usize::MAX);
    }

    #[test]
    fn params_reject_garbage() {
        for bad in ["abc", "NaN", "inf", "12px"] {
            let err = Query::from_params(None, Some(bad), None).unwrap_err();
            assert!(
                matches!(err, CatalogError::InvalidParameter { name: "offset", .. }),
                "{bad} should be rejected"
            );
        }
        assert!(matches!(
            Query::from_params(None, None, Some("ten")),
            Err(CatalogError::InvalidParameter { name: "limit", .. })
        ));
    }

    #[test]
    fn empty_tag_param_is_dropped() {
        let q = Query::from_params(Some(String::new()), None, None).unwrap();
        assert_eq!(q.tag, None);
    }
}
