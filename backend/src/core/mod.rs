//! Time primitives: wall-clock abstraction and the `(hour, minute)` slot
//! every builder consumes.

pub mod clock;
pub mod time;
