pub mod search;
pub mod seed;
pub mod status;
