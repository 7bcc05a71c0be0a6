//! Emulation controller
//!
//! Owns the emulated business-day state and the published snapshots, and
//! recomputes both on every tick.
//!
//! See `controller.rs` for the tick loop and control surface.

pub mod controller;
pub mod frame;

pub use controller::{Controller, EmulatedBusinessDayState, TickReport};
pub use frame::DashboardFrame;
