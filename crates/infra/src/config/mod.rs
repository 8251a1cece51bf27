//! Configuration loading
//!
//! Merges a probed config file with environment variables into the domain
//! [`lexintake_domain::Config`].

pub mod loader;

pub use loader::{apply_env, load, load_from_env, load_from_file, probe_config_paths};
