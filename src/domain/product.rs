use bigdecimal::BigDecimal;

use super::cart::{ProductData, ProductId, DEFAULT_IMAGEN};

/// The slice of a catalog product that the cart needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub id: ProductId,
    pub nombre: String,
    pub precio: BigDecimal,
    pub stock: i32,
    pub categoria: String,
}

impl ProductView {
    pub fn has_stock_for(&self, cantidad: i32) -> bool {
        self.stock >= cantidad
    }

    pub fn to_product_data(&self) -> ProductData {
        ProductData::new(self.nombre.clone(), self.precio.clone())
            .with_imagen(category_emoji(&self.categoria))
            .with_categoria(self.categoria.clone())
    }
}

/// Picks the glyph shown next to a product, based on its category name.
pub fn category_emoji(categoria: &str) -> &'static str {
    let name = categoria.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

    if has(&["fruta"]) {
        "🍎"
    } else if has(&["verdura"]) {
        "🥦"
    } else if has(&["carne"]) {
        "🥩"
    } else if has(&["lácteo", "leche"]) {
        "🥛"
    } else if has(&["grano", "arroz", "frijol"]) {
        "🍚"
    } else if has(&["limpieza"]) {
        "🧴"
    } else if has(&["bebida"]) {
        "🧃"
    } else if has(&["pan"]) {
        "🍞"
    } else if has(&["conserva", "enlatado"]) {
        "🥫"
    } else {
        DEFAULT_IMAGEN
    }
}
