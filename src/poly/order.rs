use crate::{error::GroebnerError, poly::monomial::Monomial};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Total order on monomials. Decides how a polynomial's terms are sorted and
/// which of them leads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MonomialOrder {
    /// Pure lexicographic, variable 0 most significant.
    #[default]
    Lex,
    /// Total degree, ties broken by `Lex`.
    GrLex,
    /// Total degree, ties broken by the reversed lexicographic comparison.
    ///
    /// The smaller of two equal-degree monomials under `Lex` is the larger
    /// one here, so with variables `x, y, z` the last variable `z` leads
    /// among linear terms.
    RevLex,
}

impl MonomialOrder {
    pub const ALL: [MonomialOrder; 3] = [Self::Lex, Self::GrLex, Self::RevLex];

    pub fn compare<M: Monomial>(&self, a: &M, b: &M) -> Ordering {
        match self {
            Self::Lex => a.compare_lex(b),
            Self::GrLex => a.degree().cmp(&b.degree()).then_with(|| a.compare_lex(b)),
            Self::RevLex => a.degree().cmp(&b.degree()).then_with(|| b.compare_lex(a)),
        }
    }
}

impl fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lex => "lex",
            Self::GrLex => "grlex",
            Self::RevLex => "revlex",
        })
    }
}

impl FromStr for MonomialOrder {
    type Err = GroebnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lex" => Ok(Self::Lex),
            "grlex" => Ok(Self::GrLex),
            "revlex" => Ok(Self::RevLex),
            other => Err(GroebnerError::config(format!(
                "unknown monomial order `{other}`, expected lex, grlex or revlex"
            ))),
        }
    }
}
