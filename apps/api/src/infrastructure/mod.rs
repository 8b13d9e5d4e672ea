// Infrastructure layer module
// Contains storage adapters and external service integrations
// Follows Hexagonal Architecture

pub mod repositories;
