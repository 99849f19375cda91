use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::cart::{Cart, ProductId, UserId};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, ProductCatalog};
use crate::domain::product::ProductView;
use crate::schema::{categorias, productos, usuarios};

use super::models::{CategoryRow, ProductRow, UserCartRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Stores each cart as JSON text in `usuarios.carrito`.
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn write_cart(conn: &mut PgConnection, user_id: UserId, cart: &Cart) -> Result<(), DomainError> {
    let encoded = cart
        .encode()
        .map_err(|e| DomainError::Internal(format!("Failed to encode cart: {}", e)))?;

    let updated = diesel::update(usuarios::table.filter(usuarios::id.eq(user_id)))
        .set(usuarios::carrito.eq(encoded))
        .execute(conn)?;

    if updated == 0 {
        return Err(DomainError::UserNotFound(user_id));
    }
    Ok(())
}

impl CartRepository for DieselCartRepository {
    fn load(&self, user_id: UserId) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;

        let row = usuarios::table
            .filter(usuarios::id.eq(user_id))
            .select(UserCartRow::as_select())
            .first(&mut conn)
            .optional()?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(Cart::decode(&row.carrito))
    }

    fn save(&self, user_id: UserId, cart: &Cart) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        write_cart(&mut conn, user_id, cart)
    }

    fn update<T, F>(&self, user_id: UserId, op: F) -> Result<(Cart, T), DomainError>
    where
        F: FnOnce(&mut Cart) -> T,
    {
        let mut conn = self.pool.get()?;

        // The row lock queues concurrent updates for the same user until commit.
        conn.transaction::<_, DomainError, _>(|conn| {
            let row = usuarios::table
                .filter(usuarios::id.eq(user_id))
                .select(UserCartRow::as_select())
                .for_update()
                .get_result(conn)
                .optional()?
                .ok_or(DomainError::UserNotFound(user_id))?;

            let mut cart = Cart::decode(&row.carrito);
            let out = op(&mut cart);
            write_cart(conn, user_id, &cart)?;

            Ok((cart, out))
        })
    }
}

impl ProductCatalog for DieselCartRepository {
    fn find_product(&self, product_id: ProductId) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let found = productos::table
            .inner_join(categorias::table)
            .filter(productos::id_producto.eq(product_id))
            .select((ProductRow::as_select(), CategoryRow::as_select()))
            .first::<(ProductRow, CategoryRow)>(&mut conn)
            .optional()?;

        Ok(found.map(|(product, category)| ProductView {
            id: product.id_producto,
            nombre: product.nombre,
            precio: product.precio,
            stock: product.stock,
            categoria: category.nombre,
        }))
    }
}
