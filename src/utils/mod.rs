//! Utility modules for imgscope

pub mod mime;
