//! HTTP inbound adapter serving the HTML pages.

pub mod assets;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod pages;
pub mod state;
pub mod views;

pub use error::PageResult;
pub use pages::configure;
