pub mod app;
pub mod config;
pub mod constants;
pub mod interaction;
pub mod message;
pub mod modes;
pub mod store;
pub mod user;
