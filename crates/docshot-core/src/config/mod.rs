//! Configuration for the capture and publish workflows
//!
//! Raw values come from command-line flags and the environment. They are
//! converted once into immutable, fully validated config values before any
//! side effect happens.

mod capture;
pub mod defaults;
mod publish;

pub use capture::CaptureConfig;
pub use defaults::*;
pub use publish::{PublishConfig, PublishSettings};
