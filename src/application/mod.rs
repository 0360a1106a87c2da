/// Application layer - Use cases, handlers and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod handlers;
pub mod use_cases;
