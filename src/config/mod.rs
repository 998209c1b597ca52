/// Database configuration and connection management
pub mod database;

/// Category seeding from config.toml
pub mod seed;

/// HTTP listener configuration from environment variables
pub mod server;
