#![warn(clippy::pedantic)]

pub mod log;
pub mod onboarding;
pub mod service;
pub mod settings;

pub use onboarding::*;
pub use settings::*;
