//! # UI Module
//!
//! Shared styling for the control window.

pub mod styles;
