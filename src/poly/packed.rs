use crate::{
    error::GroebnerError,
    poly::monomial::{write_monomial, Monomial},
};
use std::{
    cmp::Ordering,
    fmt::{Debug, Error, Formatter},
    ops::{Div, Mul, MulAssign},
};

/// Number of exponent slots in a [`PackedMonomial`].
pub const SLOTS: usize = 6;

const SLOT_BITS: u32 = 8;
const SLOT_MASK: u64 = 0xFF;
const DEGREE_SHIFT: u32 = 48;
const EXPONENT_MASK: u64 = 0x0000_FFFF_FFFF_FFFF;

/// Up to six exponents packed into one word.
///
/// Layout, most significant first: `[63..48]` total degree, `[47..40]` e0,
/// `[39..32]` e1, ... `[7..0]` e5. Variable 0 occupies the highest slot, so
/// the masked exponent bits compare lexicographically as a plain integer.
/// The degree field is rebuilt by every operation that produces a new value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedMonomial(u64);

impl PackedMonomial {
    fn shift(slot: usize) -> u32 {
        SLOT_BITS * (SLOTS - 1 - slot) as u32
    }

    fn slot(&self, slot: usize) -> u64 {
        (self.0 >> Self::shift(slot)) & SLOT_MASK
    }

    /// Attaches the total degree to raw exponent bits.
    fn from_exponent_bits(bits: u64) -> Self {
        let degree: u64 = bits.to_be_bytes()[2..].iter().map(|&b| b as u64).sum();
        Self((bits & EXPONENT_MASK) | (degree << DEGREE_SHIFT))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Monomial for PackedMonomial {
    const MAX_VARIABLES: Option<usize> = Some(SLOTS);

    fn new(exponents: &[u32]) -> Result<Self, GroebnerError> {
        if exponents.len() > SLOTS {
            return Err(GroebnerError::config(format!(
                "packed monomials hold at most {SLOTS} variables, got {}",
                exponents.len()
            )));
        }
        let mut bits = 0;
        for (slot, &exp) in exponents.iter().enumerate() {
            if exp as u64 > SLOT_MASK {
                return Err(GroebnerError::config(format!(
                    "exponent {exp} of variable {slot} exceeds {SLOT_MASK}"
                )));
            }
            bits |= (exp as u64) << Self::shift(slot);
        }
        Ok(Self::from_exponent_bits(bits))
    }

    fn exponents(&self) -> Vec<u32> {
        (0..SLOTS).map(|slot| self.slot(slot) as u32).collect()
    }

    fn degree(&self) -> u32 {
        (self.0 >> DEGREE_SHIFT) as u32
    }

    fn lcm(&self, other: &Self) -> Self {
        let bits = (0..SLOTS)
            .map(|slot| self.slot(slot).max(other.slot(slot)) << Self::shift(slot))
            .fold(0, |acc, v| acc | v);
        Self::from_exponent_bits(bits)
    }

    fn checked_mul(&self, other: &Self) -> Result<Self, GroebnerError> {
        match (0..SLOTS).find(|&slot| self.slot(slot) + other.slot(slot) > SLOT_MASK) {
            Some(variable) => Err(GroebnerError::ExponentOverflow {
                variable,
                limit: SLOT_MASK,
            }),
            None => Ok(Self::from_exponent_bits(
                (self.0 & EXPONENT_MASK) + (other.0 & EXPONENT_MASK),
            )),
        }
    }

    fn is_divisible_by(&self, divisor: &Self) -> bool {
        (0..SLOTS).all(|slot| self.slot(slot) >= divisor.slot(slot))
    }

    fn compare_lex(&self, other: &Self) -> Ordering {
        (self.0 & EXPONENT_MASK).cmp(&(other.0 & EXPONENT_MASK))
    }
}

impl Debug for PackedMonomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write_monomial(f, &self.exponents())
    }
}

impl<'a> MulAssign<&'a PackedMonomial> for PackedMonomial {
    fn mul_assign(&mut self, other: &'a PackedMonomial) {
        debug_assert!(
            (0..SLOTS).all(|slot| self.slot(slot) + other.slot(slot) <= SLOT_MASK),
            "exponent overflow in {:?} * {:?}",
            self,
            other
        );
        *self = Self::from_exponent_bits((self.0 & EXPONENT_MASK) + (other.0 & EXPONENT_MASK));
    }
}

impl<'a> Mul<&'a PackedMonomial> for PackedMonomial {
    type Output = Self;

    fn mul(self, other: &'a PackedMonomial) -> Self::Output {
        let mut result = self;
        result.mul_assign(other);
        result
    }
}

impl<'a, 'b> Mul<&'a PackedMonomial> for &'b PackedMonomial {
    type Output = PackedMonomial;

    fn mul(self, other: &'a PackedMonomial) -> Self::Output {
        let mut result = *self;
        result.mul_assign(other);
        result
    }
}

impl<'a> Div<&'a PackedMonomial> for PackedMonomial {
    type Output = Option<Self>;

    fn div(self, other: &'a PackedMonomial) -> Self::Output {
        (&self).div(other)
    }
}

impl<'a, 'b> Div<&'a PackedMonomial> for &'b PackedMonomial {
    type Output = Option<PackedMonomial>;

    /// No slot borrows from its neighbour once divisibility holds.
    fn div(self, other: &'a PackedMonomial) -> Self::Output {
        self.is_divisible_by(other).then(|| {
            PackedMonomial::from_exponent_bits((self.0 & EXPONENT_MASK) - (other.0 & EXPONENT_MASK))
        })
    }
}
