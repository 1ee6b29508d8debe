//! API handlers for the museum REST endpoints

pub mod artefacts;
pub mod health;
pub mod loans;
pub mod manager;
pub mod open_days;
pub mod openapi;
pub mod visitors;
