pub mod cart_repo;
pub mod models;
