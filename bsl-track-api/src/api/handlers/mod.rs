pub mod bsl;
pub mod service_info;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use bsl::{
    create_measurement, delete_measurement, get_measurement, list_measurements, update_measurement,
};
pub use service_info::service_info;
