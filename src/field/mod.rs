//! Coefficient domains.
//!
//! The Gröbner engine only ever talks to coefficients through [`Coefficient`]
//! (field arithmetic) and, where a magnitude is needed, [`Magnitude`]. Three
//! families implement them: IEEE floats ([`Double`], [`Single`]), integers
//! modulo a runtime modulus ([`ModInt`]) and the compile-time prime fields of
//! `ark_ff` (see [`prime`]).

pub mod float;
pub mod modular;
pub mod prime;

pub use float::{Double, Single};
pub use modular::{ModInt, Modulus};

use crate::error::GroebnerError;
use std::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::{Add, Mul, Neg, Sub},
};

/// Field arithmetic required from a polynomial coefficient.
///
/// Constants are produced relative to an existing value (`zero_like`,
/// `one_like`, ...) because some fields carry their context, e.g. the modulus
/// of a [`ModInt`], inside each value.
pub trait Coefficient:
    Clone
    + Debug
    + Display
    + PartialEq
    + Eq
    + Hash
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// `false` for approximate (floating point) fields.
    const EXACT: bool;

    fn zero_like(&self) -> Self;

    fn one_like(&self) -> Self;

    fn is_zero(&self) -> bool;

    fn is_one(&self) -> bool {
        *self == self.one_like()
    }

    /// Field division. Fails instead of panicking on a non-invertible divisor.
    fn try_div(&self, rhs: &Self) -> Result<Self, GroebnerError>;

    fn from_int_like(&self, value: i64) -> Self;

    fn from_float_like(&self, value: f64) -> Self;

    fn to_float(&self) -> f64;

    /// The value a polynomial stores for this coefficient, or `None` when the
    /// term must be dropped.
    fn canonicalize(self) -> Option<Self> {
        (!self.is_zero()).then_some(self)
    }
}

/// Ordering and magnitude operations shared by the coefficient families.
pub trait Magnitude: Coefficient + PartialOrd {
    fn abs(&self) -> Self;

    /// `None` when no square root exists in the field.
    fn sqrt(&self) -> Option<Self>;
}
