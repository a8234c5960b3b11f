//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by the REST and GraphQL
//! surfaces. Currently only trace-id propagation.

pub mod trace;

pub use trace::Trace;
