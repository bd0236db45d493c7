//! Core business logic for troophq.

pub mod services;

pub use services::*;
