#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod draft;
mod error;
mod exercise;
mod exercise_list;
mod gym;
mod name;
mod pairing;
mod program;
mod quantity;
mod service;
mod set;
mod workout_log;
mod workout_template;

pub use draft::*;
pub use error::*;
pub use exercise::*;
pub use exercise_list::*;
pub use gym::*;
pub use name::*;
pub use pairing::*;
pub use program::*;
pub use quantity::*;
pub use service::*;
pub use set::*;
pub use workout_log::*;
pub use workout_template::*;
