pub mod api;

pub use api::{AppState, router};
