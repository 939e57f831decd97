//! Mediatx - Library for building and serializing CDN transformation URL tokens
//!
//! This library provides functionality to:
//! - Accumulate transformation parameters across chained stages and
//!   serialize them to the compact wire token string
//! - Build symbolic expressions and conditions over asset characteristics
//!   and user variables
//! - Encode overlay/underlay layer descriptors (assets, text, remote URLs)

pub mod cli;
pub mod condition;
pub mod error;
pub mod expression;
pub mod layer;
pub mod models;
pub mod transformation;
pub mod variable;
pub mod vocab;
