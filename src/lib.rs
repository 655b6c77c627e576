pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod session;
pub mod terminal;
pub mod view;

pub use error::{Error, Result};
