use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, ExprTrait, Func, FunctionCall, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};

use crate::{
    entity,
    error::ProductResult,
    models::{NewProduct, Product, SortOrder},
    repository::ProductRepository,
};

/// Byte-wise ordering of lowered names, independent of the database locale.
const SORT_KEY: &str = r#"LOWER("products"."name") COLLATE "C""#;

/// PostgreSQL-backed [`ProductRepository`].
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// `LOWER("products"."<column>")`
    fn lowered(column: entity::Column) -> FunctionCall {
        Func::lower(Expr::col((entity::Entity, column)))
    }

    fn name_equals(name: &str) -> Select<entity::Entity> {
        entity::Entity::find()
            .filter(Self::lowered(entity::Column::Name).eq(Func::lower(Expr::val(name))))
    }

    async fn fetch(&self, query: Select<entity::Entity>) -> ProductResult<Vec<Product>> {
        let models = query.all(&self.db).await.inspect_err(|e| {
            tracing::error!(error = %e, "Product query failed");
        })?;
        Ok(models.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn add(&self, input: NewProduct) -> ProductResult<i32> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.id)
    }

    async fn delete_all(&self) -> ProductResult<bool> {
        let result = entity::Entity::delete_many().exec(&self.db).await?;

        tracing::info!(removed = result.rows_affected, "Deleted all products");
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        self.fetch(entity::Entity::find().order_by_asc(entity::Column::Id))
            .await
    }

    async fn get_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let query = entity::Entity::find()
            .filter(Self::lowered(entity::Column::Category).eq(Func::lower(Expr::val(category))))
            .order_by_asc(entity::Column::Id);

        self.fetch(query).await
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn total_count(&self) -> ProductResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }

    async fn search(&self, name: &str) -> ProductResult<Vec<Product>> {
        if name.is_empty() {
            return self.get_all().await;
        }

        // STRPOS avoids escaping LIKE wildcards in user input.
        let position = Func::cust(Alias::new("STRPOS"))
            .arg(Self::lowered(entity::Column::Name))
            .arg(Func::lower(Expr::val(name)));
        let query = entity::Entity::find()
            .filter(position.gt(0))
            .order_by_asc(entity::Column::Id);

        self.fetch(query).await
    }

    async fn get_sorted(&self, order: SortOrder) -> ProductResult<Vec<Product>> {
        let direction = match order {
            SortOrder::Ascending => Order::Asc,
            SortOrder::Descending => Order::Desc,
        };
        let query = entity::Entity::find()
            .order_by(Expr::cust(SORT_KEY), direction)
            .order_by_asc(entity::Column::Id);

        self.fetch(query).await
    }

    async fn update(&self, product: Product) -> ProductResult<bool> {
        let id = product.id;
        let result = entity::Entity::update_many()
            .set(entity::ActiveModel::from(product))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Updated product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn validate_name_unique(&self, name: &str) -> ProductResult<bool> {
        let taken = Self::name_equals(name).one(&self.db).await?;
        Ok(taken.is_none())
    }

    async fn validate_name_unique_for_update(&self, id: i32, name: &str) -> ProductResult<bool> {
        let taken = Self::name_equals(name)
            .filter(entity::Column::Id.ne(id))
            .one(&self.db)
            .await?;
        Ok(taken.is_none())
    }
}
