use axum::{
    extract::State,
    Json,
};
use models::product::Model as Product;
use service::product::domain::{NewProduct, ProductPatch, ProductQuery};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/product/add", tag = "product", operation_id = "create_product",
    request_body = crate::openapi::NewProductDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewProduct>) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.products.create(input).await?))
}

#[utoipa::path(
    get, path = "/product/getall", tag = "product", operation_id = "list_products",
    params(crate::openapi::ProductQueryDoc),
    responses((status = 200, description = "Matching products", body = [crate::openapi::ProductDoc]))
)]
pub async fn list(State(state): State<ServerState>, ApiQuery(q): ApiQuery<ProductQuery>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let products = state.products.list(&q).await?;
    info!(count = products.len(), "list products");
    Ok(Json(products))
}

#[utoipa::path(
    get, path = "/product/{id}", tag = "product", operation_id = "get_product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(
    put, path = "/product/update/{id}", tag = "product", operation_id = "update_product",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.products.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/product/delete/{id}", tag = "product", operation_id = "delete_product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Confirmation text"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<String, JsonApiError> {
    state.products.delete(id).await?;
    Ok(format!("Product with ID {id} has been deleted"))
}
