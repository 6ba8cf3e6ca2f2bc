use crate::error::GroebnerError;

pub const DEFAULT_SEED: i64 = 12345;
pub const DEFAULT_MODULUS: i64 = 1345;
pub const DEFAULT_MULTIPLIER: i64 = 65;
pub const DEFAULT_INCREMENT: i64 = 17;

/// Linear congruential generator, `x' = (a * x + c) mod m`.
///
/// Reproducible test inputs only; nothing here is meant to be random in any
/// statistical sense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    modulus: i64,
    multiplier: i64,
    increment: i64,
    last: i64,
}

impl Lcg {
    pub fn new(seed: i64, modulus: i64, multiplier: i64, increment: i64) -> Result<Self, GroebnerError> {
        if modulus <= 0 {
            return Err(GroebnerError::config(format!(
                "generator modulus must be positive, got {modulus}"
            )));
        }
        Ok(Self {
            modulus,
            multiplier,
            increment,
            last: seed,
        })
    }

    /// The default parameters with another seed.
    pub fn with_seed(seed: i64) -> Self {
        Self {
            last: seed,
            ..Self::default()
        }
    }

    /// Next value in `[0, m)`.
    pub fn next_int(&mut self) -> i64 {
        let next = (self.multiplier as i128 * self.last as i128 + self.increment as i128)
            .rem_euclid(self.modulus as i128);
        self.last = next as i64;
        self.last
    }

    /// Next value in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        self.next_int() as f64 / self.modulus as f64
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self {
            modulus: DEFAULT_MODULUS,
            multiplier: DEFAULT_MULTIPLIER,
            increment: DEFAULT_INCREMENT,
            last: DEFAULT_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sequence() {
        let mut rng = Lcg::default();
        let values: Vec<i64> = (0..6).map(|_| rng.next_int()).collect();
        assert_eq!(values, vec![822, 992, 1282, 1302, 1257, 1022]);
    }

    #[test]
    fn test_next_double() {
        let mut rng = Lcg::default();
        assert_eq!(rng.next_double(), 822.0 / 1345.0);
        for _ in 0..1000 {
            let x = rng.next_double();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_reproducible() {
        let mut a = Lcg::with_seed(7);
        let mut b = Lcg::new(7, DEFAULT_MODULUS, DEFAULT_MULTIPLIER, DEFAULT_INCREMENT).unwrap();
        for _ in 0..100 {
            assert_eq!(a.next_int(), b.next_int());
        }
    }

    #[test]
    fn test_invalid_modulus() {
        assert!(matches!(
            Lcg::new(1, 0, 1, 1),
            Err(GroebnerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_large_parameters_do_not_overflow() {
        let mut rng = Lcg::new(i64::MAX, i64::MAX, i64::MAX, i64::MAX).unwrap();
        for _ in 0..10 {
            let x = rng.next_int();
            assert!((0..i64::MAX).contains(&x));
        }
    }
}
