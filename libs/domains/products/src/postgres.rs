use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    criteria::{ProductCriteria, ProductPredicate, like_pattern},
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Page, PageRequest, Product, SortDirection, SortField},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn column(field: SortField) -> entity::Column {
    match field {
        SortField::Id => entity::Column::Id,
        SortField::Name => entity::Column::Name,
        SortField::Description => entity::Column::Description,
        SortField::Price => entity::Column::Price,
    }
}

fn add_predicate(condition: Condition, predicate: &ProductPredicate) -> Condition {
    match predicate {
        ProductPredicate::NameContains(needle) => condition.add(Expr::cust_with_values(
            r#"LOWER("name") LIKE ?"#,
            [like_pattern(needle)],
        )),
        ProductPredicate::DescriptionContains(needle) => condition.add(Expr::cust_with_values(
            r#"LOWER("description") LIKE ?"#,
            [like_pattern(needle)],
        )),
        ProductPredicate::PriceAtLeast(min) => condition.add(entity::Column::Price.gte(*min)),
        ProductPredicate::PriceAtMost(max) => condition.add(entity::Column::Price.lte(*max)),
        ProductPredicate::PriceBetween(min, max) => {
            condition.add(entity::Column::Price.between(*min, *max))
        }
    }
}

fn condition(criteria: &ProductCriteria) -> Condition {
    criteria
        .predicates()
        .iter()
        .fold(Condition::all(), add_predicate)
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn search(
        &self,
        criteria: &ProductCriteria,
        page: &PageRequest,
    ) -> ProductResult<Page<Product>> {
        let mut query = entity::Entity::find().filter(condition(criteria));
        for key in page.ordering() {
            query = match key.direction {
                SortDirection::Asc => query.order_by_asc(column(key.field)),
                SortDirection::Desc => query.order_by_desc(column(key.field)),
            };
        }

        let paginator = query.paginate(&self.db, page.size);
        let total = paginator.num_items().await?;

        // Past the end, or an offset no OFFSET clause can hold.
        let reachable = page
            .page
            .checked_mul(page.size)
            .is_some_and(|offset| offset < total);
        if !reachable {
            tracing::debug!(total, page = page.page, "Page beyond last result");
            return Ok(Page::new(Vec::new(), page, total));
        }

        let models = paginator.fetch_page(page.page).await?;

        tracing::debug!(total, returned = models.len(), "Searched products");
        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => ProductError::Database(other),
        })?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductSearch, SortKey};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn widget_model() -> entity::Model {
        entity::Model {
            id: 7,
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: "9.9900".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget_model()]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.get_by_id(7).await.unwrap().unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price.to_string(), "9.99");
    }

    #[tokio::test]
    async fn test_save_of_vanished_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let result = repo.save(widget_model().into()).await;
        assert!(matches!(result, Err(ProductError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.delete(7).await.unwrap());
        assert!(!repo.delete(7).await.unwrap());
    }

    #[tokio::test]
    async fn test_search_past_last_page_skips_fetch() {
        let count_row = BTreeMap::from([("num_items", Value::from(1_i64))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row.clone()], vec![count_row]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        for request in [PageRequest::new(u64::MAX / 2, 20), PageRequest::new(1, 20)] {
            let page = repo.search(&ProductCriteria::all(), &request).await.unwrap();
            assert!(page.content.is_empty());
            assert_eq!(page.total_elements, 1);
            assert_eq!(page.total_pages, 1);
        }

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2, "{log:?}");
    }

    #[tokio::test]
    async fn test_search_builds_filtered_sorted_query() {
        let count_row = BTreeMap::from([("num_items", Value::from(1_i64))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row]])
            .append_query_results([vec![widget_model()]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        let search = ProductSearch {
            name: Some("Wid".to_string()),
            min_price: Some("5".parse().unwrap()),
            ..Default::default()
        };
        let request = PageRequest::new(0, 10).with_sort(vec![SortKey::desc(SortField::Price)]);
        let page = repo
            .search(&ProductCriteria::from_search(Some(&search)), &request)
            .await
            .unwrap();

        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].id, 7);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"LOWER(\"name\") LIKE"#), "{log}");
        assert!(log.contains(r#"ORDER BY \"products\".\"price\" DESC, \"products\".\"id\" ASC"#), "{log}");
    }
}
