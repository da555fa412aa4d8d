pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod table;
