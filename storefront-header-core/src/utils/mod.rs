//! Utility functions module

pub mod links;
