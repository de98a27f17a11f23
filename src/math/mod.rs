//! Fixed-point arithmetic and transcendental approximations.
//!
//! - [`Decimal`]: unsigned 18-decimal fixed-point value with checked ops.
//! - [`pow`], [`ln`], [`exp`]: deterministic Taylor-series approximations.
//! - [`CheckedArithmetic`]: `Result`-returning arithmetic shared by
//!   [`Amount`](crate::domain::Amount) and [`Decimal`].

mod checked;
mod decimal;
mod power;

pub use checked::CheckedArithmetic;
pub use decimal::Decimal;
pub use power::{exp, ln, pow, MAX_SERIES_TERMS, PRECISION};

/// 256-bit intermediates for fixed-point products and quotients.
mod wide {
    #![allow(clippy::all, clippy::pedantic, missing_docs)]

    uint::construct_uint! {
        pub(crate) struct U256(4);
    }
}
