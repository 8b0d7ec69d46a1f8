use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Fractional digits kept by the `NUMERIC(16, 4)` price column.
pub const PRICE_SCALE: u32 = 4;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "must not be blank"));
    }
    Ok(())
}

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(invalid("positive", "must be greater than zero"));
    }
    Ok(())
}

/// Positive, at most 4 fractional digits, at most 12 integer digits.
fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(value)?;
    if value.normalize().scale() > PRICE_SCALE {
        return Err(invalid("precision", "must have at most 4 decimal places"));
    }
    if *value >= Decimal::from(1_000_000_000_000_i64) {
        return Err(invalid("range", "must be less than 1000000000000"));
    }
    Ok(())
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Steel Bolt")]
    pub name: String,
    #[schema(example = "M8 hex bolt, zinc plated")]
    pub description: String,
    /// Decimal amount, serialized as a string
    #[schema(example = "9.99")]
    pub price: Decimal,
}

impl Product {
    /// Overwrites every field the update carries; `id` is never touched.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Widget")]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "A widget")]
    pub description: String,
    /// Accepts a JSON string or number
    #[validate(custom(function = "validate_price"))]
    #[schema(example = "9.99")]
    pub price: Decimal,
}

/// Partial update: absent or `null` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(
        length(max = 255, message = "must be at most 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(example = "19.99")]
    pub price: Option<Decimal>,
}

/// Search filters. Every field is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductSearch {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the description
    pub description: Option<String>,
    /// Inclusive lower price bound
    #[validate(custom(function = "validate_positive"))]
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound
    #[validate(custom(function = "validate_positive"))]
    pub max_price: Option<Decimal>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortField {
    Id,
    Name,
    Description,
    Price,
}

impl SortField {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Price => a.price.cmp(&b.price),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One `field[:asc|desc]` entry of the `sort` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub const fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => (field.trim(), Some(direction.trim())),
            None => (raw.trim(), None),
        };

        let field = field
            .parse::<SortField>()
            .map_err(|_| format!("unknown sort field '{field}'"))?;
        let direction = match direction {
            Some(direction) => direction
                .parse::<SortDirection>()
                .map_err(|_| format!("unknown sort direction '{direction}'"))?,
            None => SortDirection::Asc,
        };

        Ok(Self { field, direction })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}

/// Parses `price:desc,name` into sort keys. Repeated fields keep their first position.
pub fn parse_sort(raw: &str) -> Result<Vec<SortKey>, String> {
    let mut keys: Vec<SortKey> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let key = part.parse::<SortKey>()?;
        if !keys.iter().any(|k| k.field == key.field) {
            keys.push(key);
        }
    }
    Ok(keys)
}

fn deserialize_sort<'de, D>(deserializer: D) -> Result<Vec<SortKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_sort(raw.as_deref().unwrap_or_default()).map_err(serde::de::Error::custom)
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Zero-based page index, page size and sort order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Zero-based page index
    #[serde(default)]
    #[param(default = 0, minimum = 0)]
    pub page: u64,
    /// Page size
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub size: u64,
    /// Comma-separated `field[:asc|desc]` keys over id, name, description, price
    #[serde(default, deserialize_with = "deserialize_sort")]
    #[param(value_type = Option<String>, example = "price:desc,name")]
    pub sort: Vec<SortKey>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: Vec<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Requested keys followed by `id asc` unless `id` was already requested.
    pub fn ordering(&self) -> Vec<SortKey> {
        let mut keys = self.sort.clone();
        if !keys.iter().any(|k| k.field == SortField::Id) {
            keys.push(SortKey::asc(SortField::Id));
        }
        keys
    }

    /// Compares two products by [`ordering`](Self::ordering).
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        self.ordering()
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(request.size.max(1)),
        }
    }
}
