use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::schema::{categorias, productos, usuarios};

/// The part of a `usuarios` row that holds the cart.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserCartRow {
    pub id: i32,
    pub carrito: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = usuarios)]
pub struct NewUserRow {
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub carrito: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categorias)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: i32,
    pub nombre: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = categorias)]
pub struct NewCategoryRow {
    pub nombre: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = productos)]
#[diesel(primary_key(id_producto))]
#[diesel(belongs_to(CategoryRow, foreign_key = categoria_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id_producto: i32,
    pub nombre: String,
    pub precio: BigDecimal,
    pub stock: i32,
    pub categoria_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = productos)]
pub struct NewProductRow {
    pub nombre: String,
    pub precio: BigDecimal,
    pub stock: i32,
    pub categoria_id: i32,
}
