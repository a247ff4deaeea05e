// Library exports for the Entreno client
// Integration tests drive the services through these modules

pub mod api;
pub mod backend;
pub mod commands;
pub mod config;
pub mod context;
pub mod models;
pub mod services;
pub mod session;
pub mod ui;
