pub mod config;
pub mod database;
pub mod password;
pub mod telemetry;
pub mod token;

pub use token::TokenMaker;
