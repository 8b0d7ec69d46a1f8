//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::criteria::ProductCriteria;
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Page, PageRequest, Product, ProductSearch, UpdateProduct};
use crate::repository::ProductRepository;

/// Orchestrates product operations on top of a [`ProductRepository`].
///
/// Inputs are validated again here, so callers other than the HTTP layer get
/// the same guarantees. A missing id is always [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// `search` may be absent; the result is ordered by `page.ordering()`.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        search: Option<ProductSearch>,
        page: PageRequest,
    ) -> ProductResult<Page<Product>> {
        if let Some(search) = &search {
            search.validate()?;
        }
        page.validate()?;

        let criteria = ProductCriteria::from_search(search.as_ref());
        self.repository.search(&criteria, &page).await
    }

    /// Fetches, merges the present fields, and writes back.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let mut product = self.get_product(id).await?;
        product.apply_update(input);
        self.repository.save(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        self.get_product(id).await?;

        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
