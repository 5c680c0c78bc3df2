//! Minimal estimator interface shared by the tree models.

pub mod api;
