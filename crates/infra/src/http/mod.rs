//! HTTP transport shared by every REST integration

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
