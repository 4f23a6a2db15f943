pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;

pub use domain::error::DashError;
pub use domain::model::{PlayerRecord, SearchResult, SearchSource, TeamRecord};
pub use state::AppState;
