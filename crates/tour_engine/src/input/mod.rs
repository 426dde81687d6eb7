//! Pointer input handling

pub mod pointer;

pub use pointer::PointerState;
