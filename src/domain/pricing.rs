use bigdecimal::BigDecimal;

use super::cart::CartItem;

/// Subtotal from which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: i32 = 500;
/// Flat shipping fee charged below [`FREE_SHIPPING_THRESHOLD`].
pub const SHIPPING_FEE: i32 = 50;
/// Subtotal that must be strictly exceeded for the discount to apply.
pub const DISCOUNT_THRESHOLD: i32 = 300;
pub const DISCOUNT_PERCENT: i32 = 10;

/// Totals derived from a cart snapshot. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    pub subtotal: BigDecimal,
    pub envio: BigDecimal,
    pub descuento: BigDecimal,
    pub total: BigDecimal,
    pub total_items: i64,
    pub faltante_envio_gratis: BigDecimal,
}

/// Price a list of cart lines.
///
/// An empty cart still pays shipping: its subtotal of 0 is below the
/// free-shipping threshold.
pub fn price(items: &[CartItem]) -> PricingResult {
    let subtotal = items
        .iter()
        .fold(BigDecimal::from(0), |acc, item| acc + item.line_subtotal());
    let total_items = items.iter().map(|i| i64::from(i.cantidad)).sum();

    let free_shipping = BigDecimal::from(FREE_SHIPPING_THRESHOLD);
    let envio = if subtotal >= free_shipping {
        BigDecimal::from(0)
    } else {
        BigDecimal::from(SHIPPING_FEE)
    };

    // Rounded to cents; the other amounts are exact sums of 2-decimal prices.
    let descuento = if subtotal > BigDecimal::from(DISCOUNT_THRESHOLD) {
        (&subtotal * BigDecimal::from(DISCOUNT_PERCENT) / BigDecimal::from(100)).round(2)
    } else {
        BigDecimal::from(0)
    };

    let faltante_envio_gratis = if subtotal < free_shipping {
        &free_shipping - &subtotal
    } else {
        BigDecimal::from(0)
    };

    let total = &subtotal + &envio - &descuento;

    PricingResult {
        subtotal,
        envio,
        descuento,
        total,
        total_items,
        faltante_envio_gratis,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::cart::{Cart, ProductData};

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn single_line(precio: &str, cantidad: i32) -> Cart {
        let mut cart = Cart::new();
        cart.add(1, cantidad, Some(ProductData::new("Producto", dec(precio))));
        cart
    }

    #[test]
    fn below_both_thresholds() {
        let p = price(single_line("100", 2).items());

        assert_eq!(p.subtotal, dec("200"));
        assert_eq!(p.envio, dec("50"));
        assert_eq!(p.descuento, dec("0"));
        assert_eq!(p.total, dec("250"));
        assert_eq!(p.total_items, 2);
        assert_eq!(p.faltante_envio_gratis, dec("300"));
    }

    #[test]
    fn discount_without_free_shipping() {
        let p = price(single_line("350", 1).items());

        assert_eq!(p.subtotal, dec("350"));
        assert_eq!(p.envio, dec("50"));
        assert_eq!(p.descuento, dec("35"));
        assert_eq!(p.total, dec("365"));
    }

    #[test]
    fn discount_and_free_shipping() {
        let p = price(single_line("600", 1).items());

        assert_eq!(p.subtotal, dec("600"));
        assert_eq!(p.envio, dec("0"));
        assert_eq!(p.descuento, dec("60"));
        assert_eq!(p.total, dec("540"));
        assert_eq!(p.faltante_envio_gratis, dec("0"));
    }

    #[test]
    fn empty_cart_pays_shipping() {
        let p = price(&[]);

        assert_eq!(p.subtotal, dec("0"));
        assert_eq!(p.envio, dec("50"));
        assert_eq!(p.descuento, dec("0"));
        assert_eq!(p.total, dec("50"));
        assert_eq!(p.total_items, 0);
        assert_eq!(p.faltante_envio_gratis, dec("500"));
    }

    #[test]
    fn exactly_300_gets_no_discount() {
        let p = price(single_line("150", 2).items());

        assert_eq!(p.subtotal, dec("300"));
        assert_eq!(p.descuento, dec("0"));
        assert_eq!(p.total, dec("350"));
    }

    #[test]
    fn exactly_500_ships_free() {
        let p = price(single_line("250", 2).items());

        assert_eq!(p.envio, dec("0"));
        assert_eq!(p.descuento, dec("50"));
        assert_eq!(p.total, dec("450"));
        assert_eq!(p.faltante_envio_gratis, dec("0"));
    }

    #[test]
    fn sums_every_line() {
        let mut cart = Cart::new();
        cart.add(1, 3, Some(ProductData::new("Pan", dec("12.50"))));
        cart.add(2, 2, Some(ProductData::new("Leche", dec("25.25"))));
        let p = price(cart.items());

        assert_eq!(p.subtotal, dec("88.00"));
        assert_eq!(p.total_items, 5);
        assert_eq!(p.faltante_envio_gratis, dec("412.00"));
    }

    #[test]
    fn discount_is_rounded_to_cents() {
        let p = price(single_line("333.33", 1).items());

        assert_eq!(p.descuento, dec("33.33"));
        assert_eq!(p.total, dec("350.00"));
    }

    #[test]
    fn pricing_is_repeatable() {
        let cart = single_line("123.45", 3);
        assert_eq!(price(cart.items()), price(cart.items()));
    }
}
