//! Backend of the sensor hub: nodes report readings and check in, the dashboard
//! lists them, accounts gate access with bearer tokens.
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod schema;
pub mod sweeper;
pub mod utils;
