use crate::entities::product::ProductKind;
use crate::handlers::common::{
    created_response, map_service_error, normalize_string, success_response, validate_input,
    validate_price, ApiJson, ApiQuery, MessageResponse,
};
use crate::{
    errors::{ApiError, ServiceError},
    models::{Product, ProductDetails, ProductId},
    AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/add", post(add_product))
        .route("/add-perishable", post(add_perishable_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn not_found(id: &str) -> ApiError {
    ApiError::ServiceError(ServiceError::NotFound(format!("Product {} not found", id)))
}

fn require_name(name: String) -> Result<String, ApiError> {
    let name = normalize_string(name);
    if name.is_empty() {
        return Err(ApiError::ValidationError(
            "Product name cannot be blank".to_string(),
        ));
    }
    Ok(name)
}

/// List products, optionally filtered by a name or id search term
#[utoipa::path(
    get,
    path = "/products",
    params(ProductSearchParams),
    responses(
        (status = 200, description = "Products retrieved", body = Vec<ProductResponse>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProductSearchParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let products = state
        .services
        .inventory
        .list_products(params.search.as_deref())
        .await
        .map_err(map_service_error)?;

    let products: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(success_response(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = ProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let product = state
        .services
        .inventory
        .get_product(&id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| not_found(&id))?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Add a standard product
#[utoipa::path(
    post,
    path = "/products/add",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn add_product(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let CreateProductRequest {
        name,
        price,
        quantity,
    } = payload;
    let product = Product::standard(require_name(name)?, price).with_quantity(quantity);

    let created = state
        .services
        .inventory
        .add_product(product)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(ProductResponse::from(created)))
}

/// Add a perishable product
#[utoipa::path(
    post,
    path = "/products/add-perishable",
    request_body = CreatePerishableProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid or malformed payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn add_perishable_product(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreatePerishableProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let CreatePerishableProductRequest {
        name,
        price,
        quantity,
        expiry_date,
    } = payload;
    let product =
        Product::perishable(require_name(name)?, price, expiry_date).with_quantity(quantity);

    let created = state
        .services
        .inventory
        .add_product(product)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(ProductResponse::from(created)))
}

/// Update a product's name, price and (for perishables) expiry date
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let details = ProductDetails {
        name: require_name(payload.name)?,
        price: payload.price,
        expiry_date: payload.expiry_date,
    };

    let updated = state
        .services
        .inventory
        .update_product(&id, details)
        .await
        .map_err(map_service_error)?;
    if !updated {
        return Err(not_found(&id));
    }

    Ok(success_response(MessageResponse::new(
        "Product updated successfully.",
    )))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let deleted = state
        .services
        .inventory
        .delete_product(&id)
        .await
        .map_err(map_service_error)?;
    if !deleted {
        return Err(not_found(&id));
    }

    Ok(success_response(MessageResponse::new(
        "Product deleted successfully.",
    )))
}

// Request/Response DTOs

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductSearchParams {
    /// Case-insensitive name fragment or product id
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Pen",
    "price": "1.50",
    "quantity": 40
}))]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom = "validate_price")]
    #[schema(value_type = String, example = "1.50")]
    pub price: Decimal,
    /// Defaults to 0 when omitted
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Milk",
    "price": "3.00",
    "expiry_date": "2025-01-01"
}))]
pub struct CreatePerishableProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom = "validate_price")]
    #[schema(value_type = String, example = "3.00")]
    pub price: Decimal,
    /// Defaults to 1 when omitted
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[serde(alias = "expiryDate")]
    pub expiry_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(custom = "validate_price")]
    #[schema(value_type = String, example = "2.25")]
    pub price: Decimal,
    /// Applied only when the stored product is perishable
    #[serde(default, alias = "expiryDate")]
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "name": "Milk",
    "price": "3.00",
    "quantity": 1,
    "kind": "perishable",
    "perishable": true,
    "expiry_date": "2025-01-01"
}))]
pub struct ProductResponse {
    pub id: Option<ProductId>,
    pub name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub quantity: Option<i32>,
    pub kind: ProductKind,
    pub perishable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            kind: product.variant.kind(),
            perishable: product.variant.is_perishable(),
            expiry_date: product.variant.expiry_date(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
        }
    }
}
