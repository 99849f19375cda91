use super::cart::{Cart, ProductId, UserId};
use super::errors::DomainError;
use super::product::ProductView;

pub trait CartRepository: Send + Sync + 'static {
    /// Read a user's cart. Unreadable stored data comes back as an empty cart.
    fn load(&self, user_id: UserId) -> Result<Cart, DomainError>;

    /// Replace a user's stored cart.
    fn save(&self, user_id: UserId, cart: &Cart) -> Result<(), DomainError>;

    /// Load, apply `op` and save as one step. Concurrent updates for the same
    /// user are applied one after the other.
    fn update<T, F>(&self, user_id: UserId, op: F) -> Result<(Cart, T), DomainError>
    where
        F: FnOnce(&mut Cart) -> T;
}

pub trait ProductCatalog: Send + Sync + 'static {
    fn find_product(&self, product_id: ProductId) -> Result<Option<ProductView>, DomainError>;
}
