//! Translates a [`ProductSearch`] into a conjunction of predicates.
//!
//! The predicates are store-agnostic: the in-memory repository evaluates them
//! with [`ProductCriteria::matches`], the Postgres repository turns them into
//! a SQL condition.

use rust_decimal::Decimal;

use crate::models::{Product, ProductSearch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductPredicate {
    /// Lower-cased needle, matched as a substring of the lower-cased name.
    NameContains(String),
    /// Lower-cased needle, matched as a substring of the lower-cased description.
    DescriptionContains(String),
    PriceAtLeast(Decimal),
    PriceAtMost(Decimal),
    /// Inclusive on both ends.
    PriceBetween(Decimal, Decimal),
}

impl ProductPredicate {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductPredicate::NameContains(needle) => {
                product.name.to_lowercase().contains(needle.as_str())
            }
            ProductPredicate::DescriptionContains(needle) => {
                product.description.to_lowercase().contains(needle.as_str())
            }
            ProductPredicate::PriceAtLeast(min) => product.price >= *min,
            ProductPredicate::PriceAtMost(max) => product.price <= *max,
            ProductPredicate::PriceBetween(min, max) => {
                product.price >= *min && product.price <= *max
            }
        }
    }
}

/// All predicates must hold. An empty criteria matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCriteria {
    predicates: Vec<ProductPredicate>,
}

impl ProductCriteria {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_search(search: Option<&ProductSearch>) -> Self {
        let Some(search) = search else {
            return Self::all();
        };

        let mut predicates = Vec::new();

        if let Some(name) = non_blank(search.name.as_deref()) {
            predicates.push(ProductPredicate::NameContains(name.to_lowercase()));
        }
        if let Some(description) = non_blank(search.description.as_deref()) {
            predicates.push(ProductPredicate::DescriptionContains(
                description.to_lowercase(),
            ));
        }

        match (search.min_price, search.max_price) {
            (Some(min), Some(max)) => predicates.push(ProductPredicate::PriceBetween(min, max)),
            (Some(min), None) => predicates.push(ProductPredicate::PriceAtLeast(min)),
            (None, Some(max)) => predicates.push(ProductPredicate::PriceAtMost(max)),
            (None, None) => {}
        }

        Self { predicates }
    }

    pub fn predicates(&self) -> &[ProductPredicate] {
        &self.predicates
    }

    pub fn is_unrestricted(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.predicates.iter().all(|p| p.matches(product))
    }
}

/// Blank values are dropped; anything else is kept as given, spaces included.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `%needle%` with LIKE metacharacters escaped, so the needle matches literally.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
