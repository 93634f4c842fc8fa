// src/drag/mod.rs
//! Pointer-driven drag & drop: gesture lifecycle, drop-zone highlighting and drop classification.

pub mod controller;
pub mod surface;

#[cfg(test)]
mod controller_tests;

pub use controller::{DragDropController, DragError, DropListener, DropOutcome};
pub use surface::DragSurface;
