pub extern crate actix_web;

pub mod connection;
mod connection_tx_storage;
pub mod handlers;
pub mod identity;
pub mod profile;
pub mod server;
