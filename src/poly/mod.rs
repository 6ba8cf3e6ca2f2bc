//! Monomials, monomial orders and polynomials over a [`Coefficient`] field.
//!
//! [`Coefficient`]: crate::field::Coefficient

pub mod monomial;
pub mod order;
pub mod packed;
pub mod polynomial;

pub use monomial::{DenseMonomial, Monomial};
pub use order::MonomialOrder;
pub use packed::PackedMonomial;
pub use polynomial::{Polynomial, Term};
