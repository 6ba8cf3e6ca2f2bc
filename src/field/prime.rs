//! Prime fields from `ark_ff`, whose modulus lives in the type.

use crate::{
    error::GroebnerError,
    field::{Coefficient, Magnitude},
};
use ark_ff::{Field, Fp, FpConfig, One, PrimeField, Zero};

impl<P: FpConfig<N>, const N: usize> Coefficient for Fp<P, N> {
    const EXACT: bool = true;

    fn zero_like(&self) -> Self {
        <Self as Zero>::zero()
    }

    fn one_like(&self) -> Self {
        <Self as One>::one()
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn is_one(&self) -> bool {
        One::is_one(self)
    }

    fn try_div(&self, rhs: &Self) -> Result<Self, GroebnerError> {
        let inverse = Field::inverse(rhs).ok_or_else(|| GroebnerError::DivisionByZero {
            dividend: self.to_string(),
        })?;
        Ok(*self * inverse)
    }

    fn from_int_like(&self, value: i64) -> Self {
        Self::from(value)
    }

    fn from_float_like(&self, value: f64) -> Self {
        Self::from(value.round() as i64)
    }

    /// Lossy for residues wider than 53 bits.
    fn to_float(&self) -> f64 {
        self.into_bigint()
            .as_ref()
            .iter()
            .rev()
            .fold(0.0, |acc, &limb| acc * 18446744073709551616.0 + limb as f64)
    }
}

impl<P: FpConfig<N>, const N: usize> Magnitude for Fp<P, N> {
    fn abs(&self) -> Self {
        *self
    }

    fn sqrt(&self) -> Option<Self> {
        Field::sqrt(self)
    }
}
