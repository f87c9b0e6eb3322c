pub mod company_api;
pub mod core;
pub mod observability;
pub mod persistence;
pub mod repositories;
pub mod sinks;

pub use company_api::CompanyApiClient;
pub use persistence::{Database, SqliteAnalysisRepository};
pub use repositories::InMemoryAnalysisRepository;
pub use sinks::{PredictionFile, RepositorySink};
