use crate::error::GroebnerError;
use std::{
    cmp::Ordering,
    fmt::{Debug, Error, Formatter},
    hash::Hash,
    ops::{Div, Mul, MulAssign},
    vec::Vec,
};

/// Exponent tuple of a monomial.
///
/// Multiplication adds exponents componentwise. Division subtracts them and
/// yields `None` unless the divisor divides `self`, so an exponent can never
/// underflow.
pub trait Monomial:
    Clone
    + PartialEq
    + Eq
    + Hash
    + Debug
    + Send
    + Sync
    + for<'a> MulAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> Div<&'a Self, Output = Option<Self>>
{
    /// Largest number of variables the encoding can hold.
    const MAX_VARIABLES: Option<usize>;

    /// Exponent of variable `i` is `exponents[i]`.
    fn new(exponents: &[u32]) -> Result<Self, GroebnerError>;

    fn exponents(&self) -> Vec<u32>;

    fn degree(&self) -> u32;

    fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    fn lcm(&self, other: &Self) -> Self;

    /// Product that reports an exponent the encoding cannot hold. The `Mul`
    /// operators assume the product fits.
    fn checked_mul(&self, other: &Self) -> Result<Self, GroebnerError>;

    /// Every exponent of `self` is at least the matching exponent of `divisor`.
    fn is_divisible_by(&self, divisor: &Self) -> bool;

    /// Variable 0 is the most significant.
    fn compare_lex(&self, other: &Self) -> Ordering;
}

/// Exponents as a plain vector, any number of variables.
///
/// Monomials used together are assumed to share one length.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct DenseMonomial(Vec<u32>);

impl Monomial for DenseMonomial {
    const MAX_VARIABLES: Option<usize> = None;

    fn new(exponents: &[u32]) -> Result<Self, GroebnerError> {
        Ok(Self(exponents.to_vec()))
    }

    fn exponents(&self) -> Vec<u32> {
        self.0.clone()
    }

    fn degree(&self) -> u32 {
        self.0.iter().sum()
    }

    fn lcm(&self, other: &Self) -> Self {
        debug_assert_eq!(self.0.len(), other.0.len());
        Self(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| *a.max(b))
                .collect(),
        )
    }

    fn checked_mul(&self, other: &Self) -> Result<Self, GroebnerError> {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0
            .iter()
            .zip(other.0.iter())
            .enumerate()
            .map(|(variable, (a, b))| {
                a.checked_add(*b).ok_or(GroebnerError::ExponentOverflow {
                    variable,
                    limit: u32::MAX as u64,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    fn is_divisible_by(&self, divisor: &Self) -> bool {
        self.0.iter().zip(divisor.0.iter()).all(|(a, b)| a >= b)
    }

    fn compare_lex(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.cmp(b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Debug for DenseMonomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write_monomial(f, &self.0)
    }
}

/// `x0^2*x2`, or `1` for the constant monomial.
pub(crate) fn write_monomial(f: &mut Formatter<'_>, exponents: &[u32]) -> Result<(), Error> {
    let mut first = true;
    for (var, &exp) in exponents.iter().enumerate().filter(|&(_, &e)| e > 0) {
        if !first {
            write!(f, "*")?;
        }
        first = false;
        match exp {
            1 => write!(f, "x{}", var)?,
            _ => write!(f, "x{}^{}", var, exp)?,
        }
    }
    if first {
        write!(f, "1")?;
    }
    Ok(())
}

impl<'a> MulAssign<&'a DenseMonomial> for DenseMonomial {
    fn mul_assign(&mut self, other: &'a DenseMonomial) {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(lhs, rhs)| *lhs += rhs);
    }
}

impl<'a> Mul<&'a DenseMonomial> for DenseMonomial {
    type Output = Self;

    fn mul(self, other: &'a DenseMonomial) -> Self::Output {
        let mut result = self;
        result.mul_assign(other);
        result
    }
}

impl<'a, 'b> Mul<&'a DenseMonomial> for &'b DenseMonomial {
    type Output = DenseMonomial;

    fn mul(self, other: &'a DenseMonomial) -> Self::Output {
        let mut result = self.clone();
        result.mul_assign(other);
        result
    }
}

impl<'a> Div<&'a DenseMonomial> for DenseMonomial {
    type Output = Option<Self>;

    fn div(self, other: &'a DenseMonomial) -> Self::Output {
        (&self).div(other)
    }
}

impl<'a, 'b> Div<&'a DenseMonomial> for &'b DenseMonomial {
    type Output = Option<DenseMonomial>;

    fn div(self, other: &'a DenseMonomial) -> Self::Output {
        self.is_divisible_by(other).then(|| {
            DenseMonomial(
                self.0
                    .iter()
                    .zip(other.0.iter())
                    .map(|(lhs, rhs)| lhs - rhs)
                    .collect(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(exponents: &[u32]) -> DenseMonomial {
        DenseMonomial::new(exponents).unwrap()
    }

    #[test]
    fn test_degree() {
        assert_eq!(m(&[1, 2, 3]).degree(), 6);
        assert!(m(&[0, 0, 0]).is_constant());
    }

    #[test]
    fn test_mul() {
        assert_eq!(m(&[0, 2, 3]) * &m(&[0, 1, 4]), m(&[0, 3, 7]));
        assert_eq!(&m(&[1, 0]) * &m(&[0, 1]), m(&[1, 1]));
    }

    #[test]
    fn test_div() {
        assert_eq!(m(&[5, 4, 6]) / &m(&[2, 3, 0]), Some(m(&[3, 1, 6])));
        assert_eq!(&m(&[5, 4, 6]) / &m(&[5, 4, 6]), Some(m(&[0, 0, 0])));
    }

    #[test]
    fn test_div_incompatible() {
        assert_eq!(m(&[0, 2, 3]) / &m(&[0, 1, 4]), None);
        assert!(!m(&[0, 2, 3]).is_divisible_by(&m(&[1, 0, 0])));
    }

    #[test]
    fn test_lcm() {
        assert_eq!(m(&[0, 2, 3, 0]).lcm(&m(&[0, 1, 5, 2])), m(&[0, 2, 5, 2]));
        assert_eq!(m(&[0, 0]).lcm(&m(&[0, 0])), m(&[0, 0]));
    }

    #[test]
    fn test_checked_mul() {
        assert_eq!(m(&[0, 200]).checked_mul(&m(&[1, 100])), Ok(m(&[1, 300])));
        assert_eq!(
            m(&[u32::MAX, 0]).checked_mul(&m(&[1, 1])),
            Err(GroebnerError::ExponentOverflow {
                variable: 0,
                limit: u32::MAX as u64
            })
        );
    }

    #[test]
    fn test_compare_lex() {
        assert_eq!(m(&[1, 0, 0]).compare_lex(&m(&[0, 5, 5])), Ordering::Greater);
        assert_eq!(m(&[1, 2, 0]).compare_lex(&m(&[1, 2, 1])), Ordering::Less);
        assert_eq!(m(&[1, 2, 1]).compare_lex(&m(&[1, 2, 1])), Ordering::Equal);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", m(&[2, 0, 1])), "x0^2*x2");
        assert_eq!(format!("{:?}", m(&[0, 0, 0])), "1");
    }
}
