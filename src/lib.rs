//! Library crate for price-quiz-back, exposing modules for binaries and integration tests.

pub mod clock;
mod config;
pub mod dao;
mod dto;
mod error;
pub mod feed;
pub mod room;
pub mod routes;
pub mod services;
pub mod state;
