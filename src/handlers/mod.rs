pub mod cart;

use actix_web::HttpResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        cart::get_cart,
        cart::get_cart_summary,
        cart::add_to_cart,
        cart::update_cart,
        cart::remove_from_cart,
        cart::clear_cart,
    ),
    tags((name = "cart", description = "Per-user shopping cart"))
)]
pub struct ApiDoc;

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
