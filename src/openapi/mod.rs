use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "POS API",
        version = "0.1.0",
        description = r#"
# Point of Sale API

Product catalog with perishable products and a minimal cart and checkout flow.

## Error Handling

Failing requests return a consistent body:

```json
{
  "error": "Not Found",
  "message": "Not found: Product 999 not found",
  "request_id": "6f1c...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```

Send `x-request-id` to correlate requests with server logs; it is echoed on every response.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Point of Sale", description = "Cart and checkout endpoints"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        // Products
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::add_product,
        crate::handlers::products::add_perishable_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        // Point of Sale
        crate::handlers::point_of_sale::add_to_cart,
        crate::handlers::point_of_sale::checkout,
        // Health
        crate::handlers::health::health_check,
        crate::handlers::health::status,
    ),
    components(
        schemas(
            crate::handlers::products::ProductResponse,
            crate::handlers::products::CreateProductRequest,
            crate::handlers::products::CreatePerishableProductRequest,
            crate::handlers::products::UpdateProductRequest,
            crate::handlers::common::MessageResponse,
            crate::entities::product::ProductKind,
            crate::entities::sale::SaleStatus,
            crate::models::Sale,
            crate::models::PaymentInfo,
            crate::handlers::health::HealthResponse,
            crate::handlers::health::StatusResponse,
            crate::handlers::health::ComponentStatus,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_catalog_and_till_paths() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("POS API"));
        assert!(json.contains("/products/add-perishable"));
        assert!(json.contains("/products/{id}"));
        assert!(json.contains("/Point_Of_Sale/checkout"));
    }
}
