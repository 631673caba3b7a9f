use crate::errors::{ApiError, ServiceError};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Largest value a `decimal(10, 2)` price column holds
pub const MAX_PRICE: Decimal = dec!(99999999.99);

/// Digits kept after the decimal point for prices
pub const PRICE_SCALE: u32 = 2;

/// JSON body extractor whose rejections use the API error body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string extractor whose rejections use the API error body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))
}

/// Map service errors to API errors
pub fn map_service_error(err: ServiceError) -> ApiError {
    ApiError::ServiceError(err)
}

/// Custom validator for Decimal minimum value
pub fn validate_decimal_min_zero(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("decimal_min_zero");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Custom validator for Decimal maximum value
pub fn validate_decimal_max(value: &Decimal) -> Result<(), ValidationError> {
    if *value > MAX_PRICE {
        let mut err = ValidationError::new("decimal_max");
        err.message = Some(format!("must not exceed {}", MAX_PRICE).into());
        return Err(err);
    }
    Ok(())
}

/// Non-negative, at most [`MAX_PRICE`], at most [`PRICE_SCALE`] decimal places
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    validate_decimal_min_zero(value)?;
    validate_decimal_max(value)?;
    if value.normalize().scale() > PRICE_SCALE {
        let mut err = ValidationError::new("decimal_scale");
        err.message = Some(format!("must have at most {} decimal places", PRICE_SCALE).into());
        return Err(err);
    }
    Ok(())
}

pub fn normalize_string(value: String) -> String {
    value.trim().to_string()
}

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product updated successfully.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
