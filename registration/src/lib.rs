//! Voter registration wizard core.
//!
//! Holds the four-step identity verification flow (Aadhaar entry, OTP
//! verification, simulated fingerprint scan, completion) independent of any
//! renderer. The egui front end and the terminal driver both sit on top of
//! [`wizard::RegistrationManager`].

pub mod config;
pub mod highlight;
pub mod http_client;
pub mod wallet;
pub mod wasm_utils;
pub mod wizard;

pub use config::{AppConfig, ConfigError};
pub use http_client::{ApiError, HttpClient};
pub use wizard::prelude::*;
