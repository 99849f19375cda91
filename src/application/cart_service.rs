use crate::domain::cart::{AddOutcome, Cart, ProductId, UserId};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, ProductCatalog};
use crate::domain::pricing::{self, PricingResult};
use crate::domain::product::ProductView;

/// A cart together with the totals computed from it.
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub cart: Cart,
    pub pricing: PricingResult,
}

impl From<Cart> for PricedCart {
    fn from(cart: Cart) -> Self {
        let pricing = pricing::price(cart.items());
        Self { cart, pricing }
    }
}

#[derive(Debug, Clone)]
pub struct AddedToCart {
    pub cart: Cart,
    pub product: ProductView,
    pub outcome: AddOutcome,
}

pub struct CartService<R> {
    repo: R,
}

impl<R: CartRepository + ProductCatalog> CartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_cart(&self, user_id: UserId) -> Result<Cart, DomainError> {
        self.repo.load(user_id)
    }

    pub fn summary(&self, user_id: UserId) -> Result<PricedCart, DomainError> {
        self.repo.load(user_id).map(PricedCart::from)
    }

    /// Add `cantidad` units of a catalog product to the user's cart.
    ///
    /// The product must exist and have at least `cantidad` units in stock;
    /// otherwise the cart is left untouched.
    pub fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        cantidad: i32,
    ) -> Result<AddedToCart, DomainError> {
        if cantidad < 1 {
            return Err(DomainError::InvalidInput(format!(
                "cantidad must be at least 1, got {}",
                cantidad
            )));
        }

        let product = self
            .repo
            .find_product(product_id)?
            .ok_or(DomainError::ProductNotFound(product_id))?;

        if !product.has_stock_for(cantidad) {
            return Err(DomainError::InsufficientStock {
                available: product.stock,
            });
        }

        let data = product.to_product_data();
        let (cart, outcome) = self
            .repo
            .update(user_id, |cart| cart.add(product_id, cantidad, Some(data)))?;

        if outcome == AddOutcome::Ignored {
            log::warn!(
                "Add of product {} to cart of user {} was dropped",
                product_id,
                user_id
            );
        } else {
            log::debug!(
                "User {} added {} x product {} ({:?})",
                user_id,
                cantidad,
                product_id,
                outcome
            );
        }

        Ok(AddedToCart {
            cart,
            product,
            outcome,
        })
    }

    pub fn update_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        cantidad: i32,
    ) -> Result<PricedCart, DomainError> {
        let (cart, matched) = self
            .repo
            .update(user_id, |cart| cart.update_quantity(product_id, cantidad))?;
        log::debug!(
            "User {} set product {} to {} (matched: {})",
            user_id,
            product_id,
            cantidad,
            matched
        );
        Ok(cart.into())
    }

    pub fn remove_from_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<PricedCart, DomainError> {
        let (cart, removed) = self
            .repo
            .update(user_id, |cart| cart.remove(product_id))?;
        log::debug!(
            "User {} removed product {} (removed: {})",
            user_id,
            product_id,
            removed
        );
        Ok(cart.into())
    }

    pub fn clear_cart(&self, user_id: UserId) -> Result<Cart, DomainError> {
        let (cart, ()) = self.repo.update(user_id, Cart::clear)?;
        log::debug!("User {} cleared their cart", user_id);
        Ok(cart)
    }
}
