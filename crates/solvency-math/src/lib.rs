//! # Solvency Math
//!
//! Numerical building blocks for the Solvency collateral risk library.
//!
//! This crate provides:
//!
//! - **Special functions**: Gaussian error function `erf` and its complement `erfc`
//! - **Distributions**: Standard normal quantile, CDF and PDF
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Fixed rational approximations, compile-time coefficient tables
//! - **Saturating**: Underflow and overflow return the correct boundary value, never NaN
//! - **Pure**: No state, no I/O; everything is a function of its arguments

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::many_single_char_names)]

pub mod distributions;
pub mod error;
pub mod special;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_pdf, normal_quantile};
    pub use crate::error::{MathError, MathResult};
    pub use crate::special::{erf, erfc};
}

pub use error::{MathError, MathResult};
