use crate::handlers::common::{
    map_service_error, success_response, validate_input, ApiJson, ApiQuery,
};
use crate::{
    errors::ApiError,
    models::{PaymentInfo, Sale},
    AppState,
};
use axum::{
    extract::State,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Creates the router for the till endpoints
pub fn point_of_sale_routes() -> Router<AppState> {
    Router::new()
        .route("/add-to-cart", post(add_to_cart))
        .route("/checkout", post(checkout))
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddToCartParams {
    /// Product to add
    #[serde(rename = "productId", alias = "product_id")]
    pub product_id: String,
    /// Units to add, at least 1
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Price an item on a new pending sale
#[utoipa::path(
    post,
    path = "/Point_Of_Sale/add-to-cart",
    params(AddToCartParams),
    responses(
        (status = 200, description = "Pending sale", body = Sale),
        (status = 400, description = "Invalid parameters or cart total out of range", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown product (catalog pricing)", body = crate::errors::ErrorResponse)
    ),
    tag = "Point of Sale"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AddToCartParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&params)?;

    let sale = state
        .services
        .transactions
        .add_item_to_cart(&params.product_id, params.quantity)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(sale))
}

/// Complete a sale with the given payment
#[utoipa::path(
    post,
    path = "/Point_Of_Sale/checkout",
    request_body = PaymentInfo,
    responses(
        (status = 200, description = "Completed sale", body = Sale),
        (status = 400, description = "Malformed payment", body = crate::errors::ErrorResponse)
    ),
    tag = "Point of Sale"
)]
pub async fn checkout(
    State(state): State<AppState>,
    ApiJson(payment): ApiJson<PaymentInfo>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let sale = state
        .services
        .transactions
        .process_checkout(payment)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(sale))
}
