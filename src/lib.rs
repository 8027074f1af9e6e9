pub mod config;
pub mod errors;
pub mod managers;
pub mod models;
pub mod utils;
