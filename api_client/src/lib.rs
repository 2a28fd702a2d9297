pub mod client;
pub mod error;
pub mod model;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use reqwest::StatusCode;
