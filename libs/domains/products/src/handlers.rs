//! HTTP handlers for the product catalog

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    IdPath,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::messages;
use crate::models::{NewProduct, Product, SearchQuery, SortOrder, SortQuery};
use crate::outcome::{Outcome, Payload};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::validation::{validate_new_product, validate_product_update};

const TAG: &str = "Products";

/// OpenAPI documentation for the product catalog
#[derive(OpenApi)]
#[openapi(
    paths(
        add_product,
        get_all,
        get_by_id,
        search,
        total_count,
        get_by_category,
        get_sorted,
        update_product,
        delete_all,
        delete_by_id,
    ),
    components(
        schemas(Product, NewProduct, SortOrder),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router. Paths are absolute (`/product/...`).
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/product",
            get(get_all)
                .post(add_product)
                .put(update_product)
                .delete(delete_all),
        )
        .route("/product/search", get(search))
        .route("/product/total-count", get(total_count))
        .route("/product/sort", get(get_sorted))
        .route("/product/category/{category}", get(get_by_category))
        .route("/product/{id}", get(get_by_id).delete(delete_by_id))
        .with_state(shared_service)
}

/// Parse an optional JSON body. Empty bodies and `null` both yield `None`.
fn read_body<T: DeserializeOwned>(body: &Bytes) -> ProductResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let Json(value) = Json::<Option<T>>::from_bytes(body)?;
    Ok(value)
}

/// Turn a failed outcome into a 400 carrying its message.
fn accepted(outcome: Outcome) -> ProductResult<Outcome> {
    if outcome.success {
        Ok(outcome)
    } else {
        Err(ProductError::Rejected(
            outcome
                .message
                .unwrap_or_else(|| messages::PRODUCT_NOT_FOUND.to_string()),
        ))
    }
}

fn not_found() -> ProductError {
    ProductError::NotFound(messages::PRODUCT_NOT_FOUND.to_string())
}

/// Add a product
#[utoipa::path(
    post,
    path = "/product",
    tag = TAG,
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created; body is the new id", body = i32),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    body: Bytes,
) -> ProductResult<impl IntoResponse> {
    let input = validate_new_product(read_body(&body)?)?;

    let outcome = accepted(service.add_product(input).await?)?;
    let Payload::Id(id) = outcome.payload else {
        return Err(ProductError::Rejected(messages::PRODUCT_EMPTY.to_string()));
    };

    Ok((StatusCode::CREATED, Json(id)))
}

/// List every product
///
/// An empty catalog answers 200 with an empty body.
#[utoipa::path(
    get,
    path = "/product",
    tag = TAG,
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_all<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Response> {
    let outcome = service.get_all().await?;

    if !outcome.success {
        return Ok(StatusCode::OK.into_response());
    }
    Ok(Json(outcome.into_products()).into_response())
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_id<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let outcome = service.get_by_id(id).await?;

    if !outcome.success {
        return Err(not_found());
    }
    outcome
        .into_products()
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(not_found)
}

/// Search products by name
///
/// Case-insensitive substring match; omitting `name` returns every product.
#[utoipa::path(
    get,
    path = "/product/search",
    tag = TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let name = query.name.unwrap_or_default();
    let outcome = accepted(service.search(&name).await?)?;
    Ok(Json(outcome.into_products()))
}

/// Count products
#[utoipa::path(
    get,
    path = "/product/total-count",
    tag = TAG,
    responses(
        (status = 200, description = "Number of products", body = u64),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn total_count<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<u64>> {
    let outcome = accepted(service.total_count().await?)?;
    Ok(Json(outcome.count().unwrap_or_default()))
}

/// List products in a category
#[utoipa::path(
    get,
    path = "/product/category/{category}",
    tag = TAG,
    params(
        ("category" = String, Path, description = "Category, matched ignoring case")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let outcome = accepted(service.get_by_category(&category).await?)?;
    Ok(Json(outcome.into_products()))
}

/// List products ordered by name
#[utoipa::path(
    get,
    path = "/product/sort",
    tag = TAG,
    params(SortQuery),
    responses(
        (status = 200, description = "Products ordered by name", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_sorted<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SortQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let order: SortOrder = query
        .order
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ProductError::InvalidSortOrder)?;

    let outcome = accepted(service.get_sorted(order).await?)?;
    Ok(Json(outcome.into_products()))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/product",
    tag = TAG,
    request_body = Product,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    body: Bytes,
) -> ProductResult<StatusCode> {
    let product = validate_product_update(read_body(&body)?)?;

    accepted(service.update_product(product).await?)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every product
#[utoipa::path(
    delete,
    path = "/product",
    tag = TAG,
    responses(
        (status = 204, description = "Catalog emptied (also when it already was)"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_all<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<StatusCode> {
    service.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product by id
#[utoipa::path(
    delete,
    path = "/product/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_by_id<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    let outcome = service.delete_product_by_id(id).await?;

    if !outcome.success {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
