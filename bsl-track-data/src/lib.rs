// BSL Track data layer
// This crate handles database connectivity and measurement storage

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
