//! Shared type definitions
//!
//! This module contains the data types shared by intake, prediction and the UI.

pub mod model;
pub mod prediction;
