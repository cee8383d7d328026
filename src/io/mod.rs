//! I/O utilities for segment access
//!
//! This module provides byte order strategies and the bounds-checked
//! segment reader the decoder is built on.

pub mod byte_order;
pub mod segment_reader;
