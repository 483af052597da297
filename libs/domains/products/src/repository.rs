use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, SortOrder};

/// Repository trait for Product persistence
///
/// Name and category comparisons ignore case. Store faults are returned as
/// errors; "nothing matched" is never an error at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product and return its assigned id
    async fn add(&self, input: NewProduct) -> ProductResult<i32>;

    /// Remove every product; true if at least one row went away
    async fn delete_all(&self) -> ProductResult<bool>;

    /// Remove one product; false if it did not exist
    async fn delete_by_id(&self, id: i32) -> ProductResult<bool>;

    async fn get_all(&self) -> ProductResult<Vec<Product>>;

    /// Exact category match, ignoring case
    async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    async fn total_count(&self) -> ProductResult<u64>;

    /// Substring match on name, ignoring case. An empty pattern matches all.
    async fn search(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// All products ordered by name, ties broken by id
    async fn get_sorted(&self, order: SortOrder) -> ProductResult<Vec<Product>>;

    /// Overwrite every field but the id; false if no product has that id
    async fn update(&self, product: Product) -> ProductResult<bool>;

    /// True when no product is named `name`
    async fn validate_name_unique(&self, name: &str) -> ProductResult<bool>;

    /// True when no product other than `id` is named `name`
    async fn validate_name_unique_for_update(&self, id: i32, name: &str) -> ProductResult<bool>;
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

/// Lowered names compared byte-wise, ties by id; the Postgres query uses the
/// same key.
fn sort_by_name(products: &mut [Product], order: SortOrder) {
    products.sort_by(|a, b| {
        let (a_key, b_key) = (a.name.to_lowercase(), b.name.to_lowercase());
        let by_name = match order {
            SortOrder::Ascending => a_key.cmp(&b_key),
            SortOrder::Descending => b_key.cmp(&a_key),
        };
        by_name.then(a.id.cmp(&b.id))
    });
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn add(&self, input: NewProduct) -> ProductResult<i32> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let id = store.last_id;
        store.products.insert(id, input.into_product(id));

        tracing::info!(product_id = id, "Created product");
        Ok(id)
    }

    async fn delete_all(&self) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.products.len();
        store.products.clear();

        tracing::info!(removed, "Deleted all products");
        Ok(removed > 0)
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }

    async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store
            .products
            .values()
            .filter(|p| p.category.to_lowercase() == category.to_lowercase())
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn total_count(&self) -> ProductResult<u64> {
        let store = self.store.read().await;
        Ok(store.products.len() as u64)
    }

    async fn search(&self, name: &str) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        let needle = name.to_lowercase();
        Ok(store
            .products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_sorted(&self, order: SortOrder) -> ProductResult<Vec<Product>> {
        let mut products = self.get_all().await?;
        sort_by_name(&mut products, order);
        Ok(products)
    }

    async fn update(&self, product: Product) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        match store.products.get_mut(&product.id) {
            Some(existing) => {
                tracing::info!(product_id = product.id, "Updated product");
                *existing = product;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn validate_name_unique(&self, name: &str) -> ProductResult<bool> {
        let store = self.store.read().await;
        let taken = store
            .products
            .values()
            .any(|p| p.name.to_lowercase() == name.to_lowercase());
        Ok(!taken)
    }

    async fn validate_name_unique_for_update(&self, id: i32, name: &str) -> ProductResult<bool> {
        let store = self.store.read().await;
        let taken = store
            .products
            .values()
            .any(|p| p.id != id && p.name.to_lowercase() == name.to_lowercase());
        Ok(!taken)
    }
}
