//! Synthetic sign-out data for exercising the application by hand.
//!
//! The generator is pure: callers supply the random source, the generation
//! time, and the group count, and insert the returned records themselves.

pub mod gen;
pub mod roster;

pub use gen::generate;
