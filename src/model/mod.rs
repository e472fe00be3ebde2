pub mod center;
pub mod cost;
pub mod product;
