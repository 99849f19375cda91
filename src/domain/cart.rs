use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub type ProductId = i32;
pub type UserId = i32;

pub const DEFAULT_NOMBRE: &str = "Producto";
pub const DEFAULT_IMAGEN: &str = "📦";
pub const DEFAULT_CATEGORIA: &str = "General";

fn default_nombre() -> String {
    DEFAULT_NOMBRE.to_string()
}

fn default_imagen() -> String {
    DEFAULT_IMAGEN.to_string()
}

fn default_categoria() -> String {
    DEFAULT_CATEGORIA.to_string()
}

/// Reads `precio` from a decimal string or a JSON number.
///
/// Floats go through their shortest decimal form, so a stored `12.99` reads
/// back as exactly 12.99 rather than its binary expansion.
fn deserialize_precio<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(BigDecimal::from(0)),
        serde_json::Value::String(s) => BigDecimal::from_str(s.trim()).map_err(D::Error::custom),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(BigDecimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(BigDecimal::from(u))
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| D::Error::custom(format!("invalid precio {}", n)))?;
                BigDecimal::from_str(&f.to_string()).map_err(D::Error::custom)
            }
        }
        other => Err(D::Error::custom(format!("invalid precio {}", other))),
    }
}

/// One product line inside a user's cart.
///
/// This is also the persisted shape: a cart is stored as a JSON array of
/// these objects in the user's `carrito` column. `precio` is written as a
/// decimal string and read back from either a string or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    #[serde(default = "default_nombre")]
    pub nombre: String,
    #[serde(default, deserialize_with = "deserialize_precio")]
    pub precio: BigDecimal,
    pub cantidad: i32,
    #[serde(default = "default_imagen")]
    pub imagen: String,
    #[serde(default = "default_categoria")]
    pub categoria: String,
}

impl CartItem {
    pub fn line_subtotal(&self) -> BigDecimal {
        &self.precio * BigDecimal::from(self.cantidad)
    }
}

/// Product details used to build a new cart line.
///
/// Every field has a fallback, so a line can always be built even from a
/// partially known product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductData {
    pub nombre: String,
    pub precio: BigDecimal,
    pub imagen: String,
    pub categoria: String,
}

impl Default for ProductData {
    fn default() -> Self {
        Self {
            nombre: default_nombre(),
            precio: BigDecimal::from(0),
            imagen: default_imagen(),
            categoria: default_categoria(),
        }
    }
}

impl ProductData {
    pub fn new(nombre: impl Into<String>, precio: BigDecimal) -> Self {
        Self {
            nombre: nombre.into(),
            precio,
            ..Self::default()
        }
    }

    pub fn with_imagen(mut self, imagen: impl Into<String>) -> Self {
        self.imagen = imagen.into();
        self
    }

    pub fn with_categoria(mut self, categoria: impl Into<String>) -> Self {
        self.categoria = categoria.into();
        self
    }

    fn into_item(self, id: ProductId, cantidad: i32) -> CartItem {
        CartItem {
            id,
            nombre: self.nombre,
            precio: self.precio,
            cantidad,
            imagen: self.imagen,
            categoria: self.categoria,
        }
    }
}

/// What `Cart::add` did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was already in the cart; its quantity was incremented.
    Merged,
    /// A new line was appended from the supplied product data.
    Appended,
    /// Nothing matched and no product data was supplied, so nothing changed.
    Ignored,
}

/// An ordered list of cart lines with at most one line per product id and
/// every `cantidad` at least 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.cantidad < 1 {
                continue;
            }
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => existing.cantidad = existing.cantidad.saturating_add(item.cantidad),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Decode the persisted text form.
    ///
    /// Missing or malformed data yields an empty cart; the failure is logged
    /// and never returned to the caller.
    pub fn decode(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::new();
        }
        match serde_json::from_str::<Vec<CartItem>>(raw) {
            Ok(items) => Self::from_items(items),
            Err(e) => {
                log::warn!("Discarding unreadable cart data: {}", e);
                Self::new()
            }
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i64::from(i.cantidad)).sum()
    }

    /// Add `quantity` units of `product_id`.
    ///
    /// An existing line is incremented. Otherwise a new line is appended from
    /// `data`; without `data` the call is a no-op and reports
    /// [`AddOutcome::Ignored`].
    pub fn add(
        &mut self,
        product_id: ProductId,
        quantity: i32,
        data: Option<ProductData>,
    ) -> AddOutcome {
        if let Some(pos) = self.items.iter().position(|i| i.id == product_id) {
            let item = &mut self.items[pos];
            item.cantidad = item.cantidad.saturating_add(quantity);
            if item.cantidad < 1 {
                self.items.remove(pos);
            }
            return AddOutcome::Merged;
        }

        match data {
            Some(data) if quantity >= 1 => {
                self.items.push(data.into_item(product_id, quantity));
                AddOutcome::Appended
            }
            _ => AddOutcome::Ignored,
        }
    }

    /// Set the quantity of `product_id` to `quantity`, removing the line when
    /// `quantity <= 0`. Returns whether a line matched.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i32) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.id == product_id) else {
            return false;
        };
        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].cantidad = quantity;
        }
        true
    }

    /// Drop every line for `product_id`. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn price(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn leche() -> ProductData {
        ProductData::new("Leche", price("25.50"))
            .with_imagen("🥛")
            .with_categoria("Lácteos")
    }

    fn cart_with(id: ProductId, cantidad: i32) -> Cart {
        let mut cart = Cart::new();
        cart.add(id, cantidad, Some(leche()));
        cart
    }

    // ── decode / encode ───────────────────────────────────────────────────────

    #[test]
    fn decode_blank_is_empty() {
        assert!(Cart::decode("").is_empty());
        assert!(Cart::decode("   ").is_empty());
    }

    #[test]
    fn decode_malformed_is_empty() {
        assert!(Cart::decode("not json").is_empty());
        assert!(Cart::decode("{\"id\": 1}").is_empty());
        assert!(Cart::decode("[{\"nombre\": \"sin id\"}]").is_empty());
    }

    #[test]
    fn decode_accepts_numeric_and_string_prices() {
        let raw = r#"[
            {"id": 1, "nombre": "Pan", "precio": 12, "cantidad": 2, "imagen": "🍞", "categoria": "Pan"},
            {"id": 2, "nombre": "Arroz", "precio": "30.25", "cantidad": 1, "imagen": "🍚", "categoria": "Granos"}
        ]"#;
        let cart = Cart::decode(raw);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].precio, price("12"));
        assert_eq!(cart.items()[1].precio, price("30.25"));
    }

    #[test]
    fn decode_reads_float_prices_in_shortest_form() {
        let raw = r#"[
            {"id": 1, "precio": 12.99, "cantidad": 1},
            {"id": 2, "precio": 0.1, "cantidad": 3},
            {"id": 3, "precio": 19.9, "cantidad": 1}
        ]"#;
        let cart = Cart::decode(raw);

        assert_eq!(cart.get(1).map(|i| i.precio.to_string()), Some("12.99".to_string()));
        assert_eq!(cart.get(2).map(|i| i.precio.clone()), Some(price("0.1")));
        assert_eq!(cart.get(3).map(|i| i.precio.clone()), Some(price("19.9")));
        assert_eq!(
            cart.items().iter().map(CartItem::line_subtotal).fold(BigDecimal::from(0), |a, b| a + b),
            price("33.19")
        );

        let encoded = cart.encode().expect("encode");
        assert!(encoded.contains(r#""precio":"12.99""#), "{encoded}");
        assert!(encoded.contains(r#""precio":"19.9""#), "{encoded}");
    }

    #[test]
    fn decode_rejects_non_numeric_price() {
        assert!(Cart::decode(r#"[{"id": 1, "precio": "caro", "cantidad": 1}]"#).is_empty());
        assert!(Cart::decode(r#"[{"id": 1, "precio": true, "cantidad": 1}]"#).is_empty());
    }

    #[test]
    fn decode_treats_null_price_as_zero() {
        let cart = Cart::decode(r#"[{"id": 1, "precio": null, "cantidad": 1}]"#);
        assert_eq!(cart.get(1).map(|i| i.precio.clone()), Some(BigDecimal::from(0)));
    }

    #[test]
    fn decode_fills_missing_display_fields_with_defaults() {
        let cart = Cart::decode(r#"[{"id": 7, "precio": "5", "cantidad": 1}]"#);
        let item = cart.get(7).expect("item decoded");

        assert_eq!(item.nombre, DEFAULT_NOMBRE);
        assert_eq!(item.imagen, DEFAULT_IMAGEN);
        assert_eq!(item.categoria, DEFAULT_CATEGORIA);
    }

    #[test]
    fn decode_restores_invariants() {
        let raw = r#"[
            {"id": 1, "precio": "10", "cantidad": 2},
            {"id": 2, "precio": "10", "cantidad": 0},
            {"id": 1, "precio": "10", "cantidad": 3}
        ]"#;
        let cart = Cart::decode(raw);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(1).map(|i| i.cantidad), Some(5));
        assert!(cart.get(2).is_none());
    }

    #[test]
    fn encoded_cart_decodes_to_same_cart() {
        let mut cart = cart_with(1, 2);
        cart.add(2, 1, Some(ProductData::new("Jabón", price("18.90"))));

        let encoded = cart.encode().expect("encode");
        assert_eq!(Cart::decode(&encoded), cart);
    }

    #[test]
    fn empty_cart_encodes_as_empty_array() {
        assert_eq!(Cart::new().encode().expect("encode"), "[]");
    }

    // ── add ───────────────────────────────────────────────────────────────────

    #[test]
    fn add_appends_new_line_from_product_data() {
        let mut cart = Cart::new();
        let outcome = cart.add(3, 2, Some(leche()));

        assert_eq!(outcome, AddOutcome::Appended);
        let item = cart.get(3).expect("line added");
        assert_eq!(item.nombre, "Leche");
        assert_eq!(item.cantidad, 2);
        assert_eq!(item.imagen, "🥛");
        assert_eq!(item.categoria, "Lácteos");
    }

    #[test]
    fn add_merges_existing_line() {
        let mut cart = cart_with(3, 2);
        let outcome = cart.add(3, 4, None);

        assert_eq!(outcome, AddOutcome::Merged);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(3).map(|i| i.cantidad), Some(6));
    }

    #[test]
    fn add_without_data_for_unknown_product_is_ignored() {
        let mut cart = cart_with(3, 1);
        let before = cart.clone();

        assert_eq!(cart.add(99, 1, None), AddOutcome::Ignored);
        assert_eq!(cart, before);
    }

    #[test]
    fn add_uses_defaults_for_unspecified_product_data() {
        let mut cart = Cart::new();
        cart.add(5, 1, Some(ProductData::default()));
        let item = cart.get(5).expect("line added");

        assert_eq!(item.nombre, DEFAULT_NOMBRE);
        assert_eq!(item.precio, BigDecimal::from(0));
        assert_eq!(item.imagen, DEFAULT_IMAGEN);
        assert_eq!(item.categoria, DEFAULT_CATEGORIA);
    }

    #[test]
    fn add_increases_total_items_by_quantity() {
        let mut cart = cart_with(1, 2);
        let before = cart.total_items();

        cart.add(1, 3, None);
        assert_eq!(cart.total_items(), before + 3);

        cart.add(2, 4, Some(leche()));
        assert_eq!(cart.total_items(), before + 7);

        cart.add(42, 5, None);
        assert_eq!(cart.total_items(), before + 7);
    }

    #[test]
    fn add_non_positive_quantity_never_creates_a_line() {
        let mut cart = cart_with(1, 2);

        assert_eq!(cart.add(5, 0, Some(leche())), AddOutcome::Ignored);
        assert_eq!(cart.add(6, -2, Some(leche())), AddOutcome::Ignored);
        assert!(cart.get(5).is_none());
        assert!(cart.get(6).is_none());
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn add_negative_quantity_down_to_zero_removes_line() {
        let mut cart = cart_with(1, 2);

        assert_eq!(cart.add(1, -2, Some(leche())), AddOutcome::Merged);
        assert!(cart.is_empty());
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut cart = Cart::new();
        for id in [4, 1, 3] {
            cart.add(id, 1, Some(leche()));
        }
        cart.add(1, 1, None);

        let ids: Vec<_> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
    }

    // ── update_quantity ───────────────────────────────────────────────────────

    #[test]
    fn update_quantity_sets_absolute_value() {
        let mut cart = cart_with(1, 5);

        assert!(cart.update_quantity(1, 2));
        assert_eq!(cart.get(1).map(|i| i.cantidad), Some(2));
    }

    #[test]
    fn update_quantity_to_zero_removes_and_is_idempotent() {
        let mut cart = cart_with(1, 5);
        cart.add(2, 1, Some(leche()));

        cart.update_quantity(1, 0);
        let once = cart.clone();
        cart.update_quantity(1, 0);

        assert!(once.get(1).is_none());
        assert_eq!(cart, once);
    }

    #[test]
    fn update_quantity_negative_removes() {
        let mut cart = cart_with(1, 5);
        cart.update_quantity(1, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_unknown_product_is_noop() {
        let mut cart = cart_with(1, 5);
        let before = cart.clone();

        assert!(!cart.update_quantity(9, 3));
        assert_eq!(cart, before);
    }

    // ── remove / clear ────────────────────────────────────────────────────────

    #[test]
    fn remove_is_idempotent() {
        let mut cart = cart_with(1, 1);
        cart.add(2, 1, Some(leche()));

        assert!(cart.remove(1));
        let once = cart.clone();
        assert!(!cart.remove(1));
        assert_eq!(cart, once);
        assert!(cart.get(2).is_some());
    }

    #[test]
    fn remove_on_empty_cart_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = cart_with(1, 3);
        cart.add(2, 1, Some(leche()));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }
}
