pub mod config;
pub mod error;
pub mod swagger_doc;
