//! Internal modules ported from external libraries.
//!
//! These modules contain code adapted from:
//! - scipy: pairwise distances and linear sum assignment

pub mod scipy;
