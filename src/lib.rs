pub mod client;
pub mod config;
pub mod movie;
pub mod service;
pub mod state;
pub mod worker;
