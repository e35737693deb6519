#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gcloud;
pub mod install;
pub mod mcp;
pub mod policy;

pub use config::Config;
pub use policy::{AllowMatcher, CommandPolicy, DenyMatcher, PolicyDecision};
