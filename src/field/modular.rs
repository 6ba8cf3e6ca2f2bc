use crate::{
    error::GroebnerError,
    field::{Coefficient, Magnitude},
};
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

/// The modulus every [`ModInt`] carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Modulus(u64);

impl Modulus {
    /// Any modulus `m >= 2`. Division only succeeds for values coprime to `m`.
    pub fn new(modulus: u64) -> Result<Self, GroebnerError> {
        if modulus < 2 {
            return Err(GroebnerError::config(format!(
                "modulus must be at least 2, got {modulus}"
            )));
        }
        Ok(Self(modulus))
    }

    /// A prime modulus, so every non-zero value is invertible.
    pub fn prime(modulus: u64) -> Result<Self, GroebnerError> {
        let this = Self::new(modulus)?;
        if !is_prime(modulus) {
            return Err(GroebnerError::config(format!(
                "modulus {modulus} is not prime"
            )));
        }
        Ok(this)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn element(self, value: i64) -> ModInt {
        let value = (value as i128).rem_euclid(self.0 as i128) as u64;
        ModInt {
            value,
            modulus: self,
        }
    }

    pub fn zero(self) -> ModInt {
        self.element(0)
    }

    pub fn one(self) -> ModInt {
        self.element(1)
    }
}

/// Deterministic Miller–Rabin for 64-bit inputs.
fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mul = |a: u64, b: u64| (a as u128 * b as u128 % n as u128) as u64;
    let pow = |mut base: u64, mut exp: u64| {
        let mut acc = 1;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = mul(acc, base);
            }
            base = mul(base, base);
            exp >>= 1;
        }
        acc
    };

    let (mut d, mut s) = (n - 1, 0);
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }
    WITNESSES.iter().all(|&a| {
        let mut x = pow(a, d);
        if x == 1 || x == n - 1 {
            return true;
        }
        for _ in 1..s {
            x = mul(x, x);
            if x == n - 1 {
                return true;
            }
        }
        false
    })
}

/// An integer modulo a runtime modulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModInt {
    value: u64,
    modulus: Modulus,
}

impl ModInt {
    pub fn value(self) -> u64 {
        self.value
    }

    pub fn modulus(self) -> Modulus {
        self.modulus
    }

    fn with(self, value: u128) -> Self {
        Self {
            value: (value % self.modulus.0 as u128) as u64,
            modulus: self.modulus,
        }
    }

    fn pow(self, mut exp: u64) -> Self {
        let mut base = self;
        let mut acc = self.modulus.one();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * base;
            }
            base = base * base;
            exp >>= 1;
        }
        acc
    }

    pub fn inverse(self) -> Result<Self, GroebnerError> {
        if self.value == 0 {
            return Err(GroebnerError::DivisionByZero {
                dividend: "1".to_owned(),
            });
        }
        let (mut r0, mut r1) = (self.modulus.0 as i128, self.value as i128);
        let (mut t0, mut t1) = (0i128, 1i128);
        while r1 != 0 {
            let q = r0 / r1;
            (r0, r1) = (r1, r0 - q * r1);
            (t0, t1) = (t1, t0 - q * t1);
        }
        if r0 != 1 {
            return Err(GroebnerError::NoModularInverse {
                value: self.value,
                modulus: self.modulus.0,
            });
        }
        Ok(self.with(t0.rem_euclid(self.modulus.0 as i128) as u128))
    }
}

impl fmt::Display for ModInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Add for ModInt {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.modulus, rhs.modulus, "mixed moduli");
        self.with(self.value as u128 + rhs.value as u128)
    }
}

impl Sub for ModInt {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.modulus, rhs.modulus, "mixed moduli");
        self.with(self.value as u128 + self.modulus.0 as u128 - rhs.value as u128)
    }
}

impl Mul for ModInt {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.modulus, rhs.modulus, "mixed moduli");
        self.with(self.value as u128 * rhs.value as u128)
    }
}

impl Neg for ModInt {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.with(self.modulus.0 as u128 - self.value as u128)
    }
}

impl PartialOrd for ModInt {
    /// Residues compare by value; values of different moduli are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.modulus == other.modulus).then(|| self.value.cmp(&other.value))
    }
}

impl Coefficient for ModInt {
    const EXACT: bool = true;

    fn zero_like(&self) -> Self {
        self.modulus.zero()
    }

    fn one_like(&self) -> Self {
        self.modulus.one()
    }

    fn is_zero(&self) -> bool {
        self.value == 0
    }

    fn try_div(&self, rhs: &Self) -> Result<Self, GroebnerError> {
        debug_assert_eq!(self.modulus, rhs.modulus, "mixed moduli");
        let inverse = rhs.inverse().map_err(|err| match err {
            GroebnerError::DivisionByZero { .. } => GroebnerError::DivisionByZero {
                dividend: self.to_string(),
            },
            other => other,
        })?;
        Ok(*self * inverse)
    }

    fn from_int_like(&self, value: i64) -> Self {
        self.modulus.element(value)
    }

    fn from_float_like(&self, value: f64) -> Self {
        self.modulus.element(value.round() as i64)
    }

    fn to_float(&self) -> f64 {
        self.value as f64
    }
}

impl Magnitude for ModInt {
    fn abs(&self) -> Self {
        *self
    }

    /// Tonelli–Shanks. Assumes a prime modulus; gives up with `None` otherwise.
    fn sqrt(&self) -> Option<Self> {
        let p = self.modulus.0;
        if self.value == 0 || p == 2 {
            return Some(*self);
        }
        if self.pow((p - 1) / 2) != self.one_like() {
            return None;
        }

        let (mut q, mut s) = (p - 1, 0u32);
        while q % 2 == 0 {
            q /= 2;
            s += 1;
        }
        let minus_one = -self.one_like();
        let non_residue = (2..p)
            .map(|z| self.modulus.element(z as i64))
            .find(|z| z.pow((p - 1) / 2) == minus_one)?;

        let mut m = s;
        let mut c = non_residue.pow(q);
        let mut t = self.pow(q);
        let mut r = self.pow((q + 1) / 2);
        while !t.is_one() {
            let mut i = 0;
            let mut t2i = t;
            while !t2i.is_one() {
                t2i = t2i * t2i;
                i += 1;
                if i == m {
                    return None;
                }
            }
            let b = c.pow(1 << (m - i - 1));
            m = i;
            c = b * b;
            t = t * c;
            r = r * b;
        }
        Some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulus_validation() {
        assert!(Modulus::new(1).is_err());
        assert!(Modulus::new(12).is_ok());
        assert!(Modulus::prime(12).is_err());
        assert!(Modulus::prime(13).is_ok());
        assert!(Modulus::prime(18446744073709551557).is_ok());
    }

    #[test]
    fn arithmetic_mod_13() {
        let p = Modulus::prime(13).unwrap();
        assert_eq!(p.element(9) + p.element(7), p.element(3));
        assert_eq!(p.element(2) - p.element(5), p.element(10));
        assert_eq!(p.element(4) * p.element(5), p.element(7));
        assert_eq!(-p.element(1), p.element(12));
        assert_eq!(p.element(-1), p.element(12));
        assert_eq!(p.element(3).try_div(&p.element(4)), Ok(p.element(4)));
    }

    #[test]
    fn large_modulus_does_not_overflow() {
        let p = Modulus::prime(18446744073709551557).unwrap();
        let a = p.element(-2);
        assert_eq!(a * a, p.element(4));
        assert_eq!(a + a, p.element(-4));
        assert_eq!(a.try_div(&a), Ok(p.one()));
    }

    #[test]
    fn inverse_failures() {
        let p = Modulus::prime(13).unwrap();
        assert_eq!(
            p.element(5).try_div(&p.zero()),
            Err(GroebnerError::DivisionByZero {
                dividend: "5".to_owned()
            })
        );

        let m = Modulus::new(12).unwrap();
        assert_eq!(
            m.element(1).try_div(&m.element(8)),
            Err(GroebnerError::NoModularInverse {
                value: 8,
                modulus: 12
            })
        );
        assert_eq!(m.element(1).try_div(&m.element(5)), Ok(m.element(5)));
    }

    #[test]
    fn square_roots() {
        let p = Modulus::prime(13).unwrap();
        for x in 0..13 {
            let square = p.element(x) * p.element(x);
            let root = square.sqrt().unwrap();
            assert_eq!(root * root, square);
        }
        assert_eq!(p.element(2).sqrt(), None);

        let q = Modulus::prime(17).unwrap();
        let root = q.element(2).sqrt().unwrap();
        assert_eq!(root * root, q.element(2));
    }

    #[test]
    fn ordering_requires_same_modulus() {
        let p = Modulus::prime(13).unwrap();
        let q = Modulus::prime(17).unwrap();
        assert!(p.element(3) < p.element(4));
        assert_eq!(p.element(3).partial_cmp(&q.element(3)), None);
    }
}
