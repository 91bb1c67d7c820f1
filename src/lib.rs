pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod favorites;
pub mod filter;
pub mod listing;
pub mod notice;
pub mod pagination;
pub mod ui;
pub mod utils;

pub use error::{AppError, Result};
