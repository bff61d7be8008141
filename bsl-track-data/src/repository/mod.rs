// Repository module structure
pub mod errors;
pub mod in_memory;
pub mod measurements;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryRepository;
pub use measurements::{MeasurementRepositoryTrait, SqliteMeasurementRepository};
