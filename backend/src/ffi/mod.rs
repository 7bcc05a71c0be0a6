//! Python bindings
//!
//! Exposes the controller to Python dashboard hosts as the `Emulator`
//! class. Frames cross the boundary as JSON strings; tick reports as dicts.

pub mod emulator;
pub mod types;
