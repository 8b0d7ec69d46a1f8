use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::criteria::ProductCriteria;
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Page, PageRequest, Product};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; the store assigns the id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// One sorted page of the products matching `criteria`
    async fn search(
        &self,
        criteria: &ProductCriteria,
        page: &PageRequest,
    ) -> ProductResult<Page<Product>>;

    /// Write back an existing product after a merge
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let product = Product {
            id: store.last_id,
            name: input.name,
            description: input.description,
            price: input.price.normalize(),
        };
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn search(
        &self,
        criteria: &ProductCriteria,
        page: &PageRequest,
    ) -> ProductResult<Page<Product>> {
        let store = self.store.read().await;

        let mut matching: Vec<&Product> = store
            .products
            .values()
            .filter(|p| criteria.matches(p))
            .collect();
        matching.sort_by(|a, b| page.compare(a, b));

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Page::new(content, page, total))
    }

    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let slot = store
            .products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;

        product.price = product.price.normalize();
        *slot = product.clone();

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.products.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductSearch, SortField, SortKey};
    use rust_decimal::Decimal;

    fn create(name: &str, price: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price: price.parse().unwrap(),
        }
    }

    async fn seeded() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        for (name, price) in [("Bolt", "2.50"), ("Nut", "0.75"), ("Washer", "0.75"), ("Anchor", "12")] {
            repo.create(create(name, price)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let repo = InMemoryProductRepository::new();
        let first = repo.create(create("Bolt", "1")).await.unwrap();
        let second = repo.create(create("Nut", "1")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        repo.delete(second.id).await.unwrap();
        let third = repo.create(create("Washer", "1")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_search_defaults_to_id_order() {
        let repo = seeded().await;
        let page = repo
            .search(&ProductCriteria::all(), &PageRequest::default())
            .await
            .unwrap();

        let ids: Vec<i32> = page.content.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_search_sorts_with_id_tie_breaker() {
        let repo = seeded().await;
        let request = PageRequest::default().with_sort(vec![SortKey::asc(SortField::Price)]);
        let page = repo.search(&ProductCriteria::all(), &request).await.unwrap();

        let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Nut", "Washer", "Bolt", "Anchor"]);
    }

    #[tokio::test]
    async fn test_search_paginates_after_filtering() {
        let repo = seeded().await;
        let search = ProductSearch {
            max_price: Some(Decimal::new(300, 2)),
            ..Default::default()
        };
        let criteria = ProductCriteria::from_search(Some(&search));

        let page = repo.search(&criteria, &PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name, "Washer");

        let beyond = repo.search(&criteria, &PageRequest::new(5, 2)).await.unwrap();
        assert!(beyond.content.is_empty());
        assert_eq!(beyond.total_elements, 3);
    }

    #[tokio::test]
    async fn test_save_requires_existing_product() {
        let repo = InMemoryProductRepository::new();
        let missing = Product {
            id: 99,
            name: "Ghost".to_string(),
            description: "not stored".to_string(),
            price: Decimal::ONE,
        };
        assert!(matches!(
            repo.save(missing).await,
            Err(ProductError::NotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_anything_was_removed() {
        let repo = seeded().await;
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        assert!(repo.get_by_id(1).await.unwrap().is_none());
    }
}
