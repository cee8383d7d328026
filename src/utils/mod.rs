//! Utility modules for common functionality
//!
//! This module provides various utility functions used throughout the application.

pub mod logger;
pub mod jpeg_utils;
pub(crate) mod string_utils;
pub(crate) mod format_utils;
