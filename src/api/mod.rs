//! Typed bindings for the backend's domain endpoints. Each module covers
//! one screen's data needs and funnels every call through the gateway.

pub mod marketing;
pub mod models;
pub mod services;
pub mod users;
