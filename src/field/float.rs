use crate::{
    error::GroebnerError,
    field::{Coefficient, Magnitude},
};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Mul, Neg, Sub},
};

/// Coefficients are kept with this many decimal digits.
pub const ROUNDING_DIGITS: i32 = 5;

/// Terms whose rounded coefficient is not strictly larger than this in
/// magnitude are dropped from a polynomial.
pub const RETENTION_THRESHOLD: f64 = 1e-2;

macro_rules! float_field {
    ($(#[$meta:meta])* $name:ident, $float:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name(pub $float);

        impl $name {
            pub const fn new(value: $float) -> Self {
                Self(value)
            }

            pub const fn value(self) -> $float {
                self.0
            }

            /// Bit pattern used for equality and hashing; both zeros map to +0.
            fn key(self) -> <$float as FloatBits>::Bits {
                if self.0 == 0.0 {
                    (0.0 as $float).to_bits()
                } else {
                    self.0.to_bits()
                }
            }

            fn rounded(self) -> Self {
                let scale = (10.0 as $float).powi(ROUNDING_DIGITS);
                Self((self.0 * scale).round() / scale)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.key() == other.key()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.key().hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                if self == other {
                    Some(Ordering::Equal)
                } else {
                    self.0.partial_cmp(&other.0)
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$float> for $name {
            fn from(value: $float) -> Self {
                Self(value)
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self::Output {
                Self(self.0 * rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Coefficient for $name {
            const EXACT: bool = false;

            fn zero_like(&self) -> Self {
                Self(0.0)
            }

            fn one_like(&self) -> Self {
                Self(1.0)
            }

            fn is_zero(&self) -> bool {
                self.0 == 0.0
            }

            fn try_div(&self, rhs: &Self) -> Result<Self, GroebnerError> {
                if rhs.is_zero() {
                    return Err(GroebnerError::DivisionByZero {
                        dividend: self.to_string(),
                    });
                }
                Ok(Self(self.0 / rhs.0))
            }

            fn from_int_like(&self, value: i64) -> Self {
                Self(value as $float)
            }

            fn from_float_like(&self, value: f64) -> Self {
                Self(value as $float)
            }

            fn to_float(&self) -> f64 {
                self.0 as f64
            }

            fn canonicalize(self) -> Option<Self> {
                let rounded = self.rounded();
                (rounded.abs() > Self(RETENTION_THRESHOLD as $float)).then_some(rounded)
            }
        }

        impl Magnitude for $name {
            fn abs(&self) -> Self {
                Self(self.0.abs())
            }

            fn sqrt(&self) -> Option<Self> {
                (self.0 >= 0.0).then(|| Self(self.0.sqrt()))
            }
        }
    };
}

trait FloatBits {
    type Bits: Eq + Hash;
}

impl FloatBits for f64 {
    type Bits = u64;
}

impl FloatBits for f32 {
    type Bits = u32;
}

float_field!(
    /// Double precision coefficient.
    Double,
    f64
);

float_field!(
    /// Single precision coefficient.
    Single,
    f32
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_rounds_to_five_digits() {
        assert_eq!(Double(0.123456789).canonicalize(), Some(Double(0.12346)));
        assert_eq!(Double(-2.000004).canonicalize(), Some(Double(-2.0)));
        assert_eq!(Single(0.5).canonicalize(), Some(Single(0.5)));
    }

    #[test]
    fn canonicalize_drops_small_coefficients() {
        assert_eq!(Double(0.01).canonicalize(), None);
        assert_eq!(Double(-0.009).canonicalize(), None);
        assert_eq!(Double(1e-12).canonicalize(), None);
        assert_eq!(Double(f64::NAN).canonicalize(), None);
        assert_eq!(Double(0.01001).canonicalize(), Some(Double(0.01001)));
    }

    #[test]
    fn canonicalize_is_idempotent() {
        for value in [0.93457, -0.39926, 12.5, 1.0 / 3.0, 7.000015] {
            let once = Double(value).canonicalize().unwrap();
            assert_eq!(once.canonicalize(), Some(once));
        }
    }

    #[test]
    fn signed_zeros_are_equal() {
        assert_eq!(Double(0.0), Double(-0.0));
        assert_ne!(Double(0.0), Double(1e-300));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(
            Double(3.0).try_div(&Double(0.0)),
            Err(GroebnerError::DivisionByZero {
                dividend: "3".to_owned()
            })
        );
        assert_eq!(Single(3.0).try_div(&Single(2.0)), Ok(Single(1.5)));
    }

    #[test]
    fn magnitude() {
        assert_eq!(Double(-4.0).abs(), Double(4.0));
        assert_eq!(Double(9.0).sqrt(), Some(Double(3.0)));
        assert_eq!(Double(-9.0).sqrt(), None);
        assert!(Double(-1.0) < Double(0.5));
    }
}
