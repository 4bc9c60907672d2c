//! Cablelabels - Automatic Cable Labels
//!
//! A CLI tool and library that keeps a small inventory of cables and derives
//! a human-readable label for each one from a configurable Jinja-style
//! template whenever a cable is saved without an explicit label.

pub mod cli;
pub mod config;
pub mod error;
pub mod hooks;
pub mod model;
pub mod render;
pub mod storage;

pub use error::{LabelError, Result};
