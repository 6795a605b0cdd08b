pub mod bench;
pub mod config;
pub mod display;
pub mod errors;
pub mod exec;
pub mod parse;
pub mod types;
