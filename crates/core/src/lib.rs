//! Domain logic shared by the vendor clients and the HTTP API.
//!
//! Nothing in this crate performs I/O. It owns the vendor enumeration,
//! the normalized status vocabulary, vendor status mapping, request
//! validation and the fixed model parameters sent to each vendor.

pub mod error;
pub mod generation;
pub mod image_models;
pub mod status;
pub mod types;
pub mod vendor;
