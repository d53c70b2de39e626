pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logger;
pub mod matching;
pub mod messages;
pub mod normalize;
pub mod persistence;
pub mod position;
pub mod provider;
pub mod types;
pub mod utils;
