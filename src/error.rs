use thiserror::Error;

/// Every way a basis computation (or one of its building blocks) can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroebnerError {
    #[error("division by zero: {dividend} / 0")]
    DivisionByZero { dividend: String },

    #[error("{value} has no inverse modulo {modulus}")]
    NoModularInverse { value: u64, modulus: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("exponent of variable {variable} exceeds {limit}")]
    ExponentOverflow { variable: usize, limit: u64 },

    #[error("S-polynomial of the zero polynomial is undefined")]
    ZeroPolynomial,

    #[error("S-polynomial of basis[{i}] and basis[{j}]: {source}")]
    Pair {
        i: usize,
        j: usize,
        #[source]
        source: Box<GroebnerError>,
    },

    #[error("self-reduction of basis[{index}]: {source}")]
    SelfReduction {
        index: usize,
        #[source]
        source: Box<GroebnerError>,
    },

    #[error("no fixpoint after {passes} passes, basis size {basis_size}")]
    PassLimit { passes: usize, basis_size: usize },

    #[error("basis grew past {limit} polynomials")]
    BasisLimit { limit: usize },

    #[error("parse error: {0}")]
    Parse(String),
}

impl GroebnerError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
