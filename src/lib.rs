//! Fish And Fisher library crate: re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can drive the fish, fisher and match logic without a window or GPU.

pub mod shared;
pub mod config;
pub mod input;
pub mod fish;
pub mod fisher;
pub mod game;
pub mod view;
