//! Custom serde modules for types JSON cannot key directly.

pub mod children;
