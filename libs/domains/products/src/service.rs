//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::messages;
use crate::models::{NewProduct, Product, SortOrder};
use crate::outcome::{Outcome, Payload};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Every operation answers with an [`Outcome`]. Expected failures (empty
/// fields, duplicate names, nothing found) are `success == false` outcomes;
/// only store faults come back as `Err`.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Add a product after checking its name is present and unused
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn add_product(&self, input: NewProduct) -> ProductResult<Outcome> {
        if input.name.is_empty() {
            tracing::warn!("Rejected product without a name");
            return Ok(Outcome::failure(messages::PRODUCT_NAME_EMPTY));
        }

        if !self.repository.validate_name_unique(&input.name).await? {
            tracing::warn!("Rejected duplicate product name");
            return Ok(Outcome::failure(messages::PRODUCT_NAME_DUPLICATE));
        }

        match self.repository.add(input).await {
            Ok(id) => {
                tracing::info!(product_id = id, "Product added");
                Ok(Outcome::ok(Payload::Id(id)))
            }
            Err(ProductError::DuplicateName(detail)) => {
                // Lost a race with a concurrent writer; the unique index caught it.
                tracing::warn!(%detail, "Unique name index rejected insert");
                Ok(Outcome::failure(messages::PRODUCT_NAME_DUPLICATE))
            }
            Err(e) => Err(e),
        }
    }

    /// All products; an empty catalog is reported as not found
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ProductResult<Outcome> {
        let products = self.repository.get_all().await?;
        Ok(non_empty(products))
    }

    #[instrument(skip(self))]
    pub async fn get_by_category(&self, category: &str) -> ProductResult<Outcome> {
        if category.is_empty() {
            return Ok(Outcome::failure(messages::PRODUCT_CATEGORY_EMPTY));
        }

        let products = self.repository.get_by_category(category).await?;
        Ok(non_empty(products))
    }

    /// A found product comes back as a one-element list
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> ProductResult<Outcome> {
        if id < 0 {
            return Ok(Outcome::failure(messages::PRODUCT_ID_LESS_THAN_ZERO));
        }

        match self.repository.get_by_id(id).await? {
            Some(product) => Ok(Outcome::ok(Payload::Products(vec![product]))),
            None => Ok(Outcome::failure(messages::PRODUCT_NOT_FOUND)),
        }
    }

    /// Unlike the other listings, an empty match is still a success
    #[instrument(skip(self))]
    pub async fn search(&self, name: &str) -> ProductResult<Outcome> {
        let products = self.repository.search(name).await?;
        Ok(Outcome::ok(Payload::Products(products)))
    }

    #[instrument(skip(self))]
    pub async fn get_sorted(&self, order: SortOrder) -> ProductResult<Outcome> {
        let products = self.repository.get_sorted(order).await?;
        Ok(non_empty(products))
    }

    /// Zero products is reported as not found
    #[instrument(skip(self))]
    pub async fn total_count(&self) -> ProductResult<Outcome> {
        match self.repository.total_count().await? {
            0 => Ok(Outcome::failure(messages::PRODUCT_NOT_FOUND)),
            count => Ok(Outcome::ok(Payload::Count(count))),
        }
    }

    /// Replace every field but the id of an existing product
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn update_product(&self, product: Product) -> ProductResult<Outcome> {
        let current = self.get_by_id(product.id).await?;
        if !current.success {
            return Ok(current);
        }

        if !self
            .repository
            .validate_name_unique_for_update(product.id, &product.name)
            .await?
        {
            tracing::warn!("Rejected duplicate product name");
            return Ok(Outcome::failure(messages::PRODUCT_NAME_DUPLICATE));
        }

        match self.repository.update(product).await {
            Ok(true) => Ok(Outcome::done()),
            // Deleted between the lookup and the write.
            Ok(false) => Ok(Outcome::failure(messages::PRODUCT_NOT_FOUND)),
            Err(ProductError::DuplicateName(detail)) => {
                tracing::warn!(%detail, "Unique name index rejected update");
                Ok(Outcome::failure(messages::PRODUCT_NAME_DUPLICATE))
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product_by_id(&self, id: i32) -> ProductResult<Outcome> {
        let current = self.get_by_id(id).await?;
        if !current.success || current.products().is_empty() {
            return Ok(Outcome::rejected());
        }

        let deleted = self.repository.delete_by_id(id).await?;
        Ok(Outcome::from_flag(deleted))
    }

    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> ProductResult<Outcome> {
        let deleted = self.repository.delete_all().await?;
        Ok(Outcome::from_flag(deleted))
    }
}

fn non_empty(products: Vec<Product>) -> Outcome {
    if products.is_empty() {
        Outcome::failure(messages::PRODUCT_NOT_FOUND)
    } else {
        Outcome::ok(Payload::Products(products))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
