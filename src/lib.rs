#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

pub mod engine;
pub mod io;
pub mod module;
pub mod utils;

/// Length of an output trigger pulse in milliseconds.
pub const TRIGGER_LENGTH_MS: u32 = 25;
