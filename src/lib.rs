pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rpc;
pub mod server;
pub mod state;
pub mod store;
pub mod types;
