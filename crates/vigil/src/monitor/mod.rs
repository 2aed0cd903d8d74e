//! Monitor entities and their polling loop.

mod core;
mod getters;
mod run;

pub use self::core::Monitor;
