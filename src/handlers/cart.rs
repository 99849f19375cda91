use actix_web::{web, HttpResponse};
use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::cart_service::{CartService, PricedCart};
use crate::domain::cart::{Cart, CartItem, UserId};
use crate::errors::AppError;
use crate::infrastructure::cart_repo::DieselCartRepository;

pub type AppCartService = CartService<DieselCartRepository>;

pub const REMOVED_MESSAGE: &str = "Producto eliminado del carrito";
pub const CLEARED_MESSAGE: &str = "Carrito vaciado correctamente";

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartItemRequest {
    pub producto_id: i32,
    /// Defaults to 1.
    #[serde(default = "default_cantidad")]
    pub cantidad: i32,
}

fn default_cantidad() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveFromCartRequest {
    pub producto_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub id: i32,
    pub nombre: String,
    /// Decimal price as a string, e.g. "25.50"
    pub precio: String,
    pub cantidad: i32,
    pub imagen: String,
    pub categoria: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    #[serde(flatten)]
    pub item: CartItemResponse,
    /// `precio × cantidad`
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub success: bool,
    pub carrito: Vec<CartItemResponse>,
    pub total_items: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddToCartResponse {
    pub success: bool,
    pub message: String,
    pub total_items: i64,
    pub carrito: Vec<CartItemResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartTotalsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub total_items: i64,
    pub subtotal: String,
    pub envio: String,
    pub descuento: String,
    pub total: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartSummaryResponse {
    pub success: bool,
    pub carrito: Vec<CartLineResponse>,
    pub total_items: i64,
    pub subtotal: String,
    pub envio: String,
    pub descuento: String,
    pub total: String,
    /// How much more must be spent to get free shipping.
    pub faltante_envio_gratis: String,
}

fn money(amount: &BigDecimal) -> String {
    amount.with_scale_round(2, RoundingMode::HalfEven).to_string()
}

impl From<&CartItem> for CartItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            nombre: item.nombre.clone(),
            precio: money(&item.precio),
            cantidad: item.cantidad,
            imagen: item.imagen.clone(),
            categoria: item.categoria.clone(),
        }
    }
}

fn cart_items(cart: &Cart) -> Vec<CartItemResponse> {
    cart.items().iter().map(CartItemResponse::from).collect()
}

impl CartTotalsResponse {
    fn priced(priced: &PricedCart, message: Option<&str>) -> Self {
        let pricing = &priced.pricing;
        Self {
            success: true,
            message: message.map(str::to_string),
            total_items: pricing.total_items,
            subtotal: money(&pricing.subtotal),
            envio: money(&pricing.envio),
            descuento: money(&pricing.descuento),
            total: money(&pricing.total),
        }
    }

    /// The clear-cart response reports every amount as zero, shipping
    /// included.
    fn cleared() -> Self {
        let zero = money(&BigDecimal::from(0));
        Self {
            success: true,
            message: Some(CLEARED_MESSAGE.to_string()),
            total_items: 0,
            subtotal: zero.clone(),
            envio: zero.clone(),
            descuento: zero.clone(),
            total: zero,
        }
    }
}

impl From<&PricedCart> for CartSummaryResponse {
    fn from(priced: &PricedCart) -> Self {
        let pricing = &priced.pricing;
        Self {
            success: true,
            carrito: priced
                .cart
                .items()
                .iter()
                .map(|item| CartLineResponse {
                    item: CartItemResponse::from(item),
                    subtotal: money(&item.line_subtotal()),
                })
                .collect(),
            total_items: pricing.total_items,
            subtotal: money(&pricing.subtotal),
            envio: money(&pricing.envio),
            descuento: money(&pricing.descuento),
            total: money(&pricing.total),
            faltante_envio_gratis: money(&pricing.faltante_envio_gratis),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /users/{user_id}/cart
///
/// Returns the stored cart. Unreadable stored data is returned as an empty
/// cart.
#[utoipa::path(
    get,
    path = "/users/{user_id}/cart",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Current cart", body = CartResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    service: web::Data<AppCartService>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let cart = web::block(move || service.get_cart(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartResponse {
        success: true,
        total_items: cart.total_items(),
        carrito: cart_items(&cart),
    }))
}

/// GET /users/{user_id}/cart/summary
///
/// Returns the cart with per-line subtotals and the computed totals.
#[utoipa::path(
    get,
    path = "/users/{user_id}/cart/summary",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Cart with totals", body = CartSummaryResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn get_cart_summary(
    service: web::Data<AppCartService>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let priced = web::block(move || service.summary(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartSummaryResponse::from(&priced)))
}

/// POST /users/{user_id}/cart/add
///
/// Adds a catalog product to the cart, merging with an existing line. The
/// request is rejected without touching the cart when the product does not
/// have `cantidad` units in stock.
#[utoipa::path(
    post,
    path = "/users/{user_id}/cart/add",
    params(("user_id" = i32, Path, description = "User id")),
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Product added", body = AddToCartResponse),
        (status = 400, description = "Invalid quantity or insufficient stock"),
        (status = 404, description = "User or product not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    service: web::Data<AppCartService>,
    path: web::Path<UserId>,
    body: web::Json<CartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let body = body.into_inner();

    let added = web::block(move || service.add_to_cart(user_id, body.producto_id, body.cantidad))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(AddToCartResponse {
        success: true,
        message: format!("¡{} agregado al carrito!", added.product.nombre),
        total_items: added.cart.total_items(),
        carrito: cart_items(&added.cart),
    }))
}

/// POST /users/{user_id}/cart/update
///
/// Sets the quantity of a line; zero or less removes it. Unknown products are
/// ignored.
#[utoipa::path(
    post,
    path = "/users/{user_id}/cart/update",
    params(("user_id" = i32, Path, description = "User id")),
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Updated totals", body = CartTotalsResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn update_cart(
    service: web::Data<AppCartService>,
    path: web::Path<UserId>,
    body: web::Json<CartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let body = body.into_inner();

    let priced =
        web::block(move || service.update_quantity(user_id, body.producto_id, body.cantidad))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartTotalsResponse::priced(&priced, None)))
}

/// POST /users/{user_id}/cart/remove
#[utoipa::path(
    post,
    path = "/users/{user_id}/cart/remove",
    params(("user_id" = i32, Path, description = "User id")),
    request_body = RemoveFromCartRequest,
    responses(
        (status = 200, description = "Updated totals", body = CartTotalsResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn remove_from_cart(
    service: web::Data<AppCartService>,
    path: web::Path<UserId>,
    body: web::Json<RemoveFromCartRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let product_id = body.into_inner().producto_id;

    let priced = web::block(move || service.remove_from_cart(user_id, product_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartTotalsResponse::priced(&priced, Some(REMOVED_MESSAGE))))
}

/// POST /users/{user_id}/cart/clear
#[utoipa::path(
    post,
    path = "/users/{user_id}/cart/clear",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Cart emptied", body = CartTotalsResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    service: web::Data<AppCartService>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    web::block(move || service.clear_cart(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartTotalsResponse::cleared()))
}
