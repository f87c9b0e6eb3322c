// Company record model and decoding
pub mod company;

// Pros/cons derivation
pub mod insights;

// Feature extraction and labeling
pub mod ml;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Core result types
pub mod types;

// Domain-specific error types
pub mod errors;
