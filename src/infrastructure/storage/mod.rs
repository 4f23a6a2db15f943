pub mod cache;
pub mod index;
