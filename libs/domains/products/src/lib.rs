//! Products Domain
//!
//! Product catalog: create, fetch, search, partially update and delete.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, not-found semantics, merge
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────┐
//! │ Repository  │ ◄── │ Criteria │  ← Search predicates
//! └──────┬──────┘     └──────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, DTOs, paging
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod criteria;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use criteria::{ProductCriteria, ProductPredicate};
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, Page, PageRequest, Product, ProductSearch, SortDirection, SortField, SortKey,
    UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
