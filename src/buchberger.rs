use crate::{
    error::GroebnerError,
    field::Coefficient,
    groebner::interreduce,
    poly::{Monomial, MonomialOrder, Polynomial},
};
use hashbrown::HashSet;
use tracing::{event, info, instrument, Level};

pub const DEFAULT_MAX_PASSES: usize = 256;
pub const DEFAULT_MAX_BASIS_SIZE: usize = 4096;

/// Ceilings on a basis computation. Running into either one aborts the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroebnerConfig {
    /// Passes over all pairs, the last (adding nothing) included.
    pub max_passes: usize,
    /// Polynomials the basis may hold before self-reduction.
    pub max_basis_size: usize,
}

impl Default for GroebnerConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            max_basis_size: DEFAULT_MAX_BASIS_SIZE,
        }
    }
}

impl GroebnerConfig {
    pub fn validate(&self) -> Result<(), GroebnerError> {
        if self.max_passes == 0 {
            return Err(GroebnerError::config("max_passes must be positive"));
        }
        if self.max_basis_size == 0 {
            return Err(GroebnerError::config("max_basis_size must be positive"));
        }
        Ok(())
    }
}

/// Buchberger-style closure of a generator set.
pub struct Buchberger;

impl Buchberger {
    /// Computes a Gröbner basis of the ideal spanned by `generators` under
    /// `order`.
    ///
    /// Every pass forms the S-polynomial of each pair of the basis as it
    /// stood when the pass began and reduces it against the basis as it is
    /// now, so polynomials added earlier in the pass already act as
    /// divisors. Non-zero remainders that are not yet members are appended.
    /// A pass that appends nothing ends the loop, and the basis is then
    /// self-reduced with [`interreduce`].
    ///
    /// The returned list has no particular order and its polynomials are
    /// not made monic.
    #[instrument(skip_all, level = "debug", fields(generators = generators.len(), %order))]
    pub fn new<C: Coefficient, M: Monomial>(
        generators: &[Polynomial<C, M>],
        order: MonomialOrder,
        config: &GroebnerConfig,
    ) -> Result<Vec<Polynomial<C, M>>, GroebnerError> {
        config.validate()?;
        info!(generators = generators.len(), %order, "Buchberger start");

        let mut basis: Vec<Polynomial<C, M>> = Vec::with_capacity(generators.len());
        let mut seen: HashSet<Polynomial<C, M>> = HashSet::new();
        for generator in generators {
            let generator = generator.with_order(order);
            if !generator.is_zero() && seen.insert(generator.clone()) {
                basis.push(generator);
            }
        }
        if basis.len() > config.max_basis_size {
            return Err(GroebnerError::BasisLimit {
                limit: config.max_basis_size,
            });
        }

        let mut passes = 0;
        loop {
            if passes == config.max_passes {
                return Err(GroebnerError::PassLimit {
                    passes,
                    basis_size: basis.len(),
                });
            }
            passes += 1;

            let n = basis.len();
            let mut added = 0;
            for i in 0..n {
                for j in i + 1..n {
                    let remainder = basis[i]
                        .s_polynomial(&basis[j])
                        .and_then(|s| s.reduce(&basis))
                        .map_err(|source| GroebnerError::Pair {
                            i,
                            j,
                            source: Box::new(source),
                        })?;
                    if remainder.is_zero() || seen.contains(&remainder) {
                        continue;
                    }
                    if basis.len() == config.max_basis_size {
                        return Err(GroebnerError::BasisLimit {
                            limit: config.max_basis_size,
                        });
                    }
                    event!(Level::TRACE, i, j, index = basis.len(), polynomial = %remainder);
                    seen.insert(remainder.clone());
                    basis.push(remainder);
                    added += 1;
                }
            }
            event!(Level::DEBUG, pass = passes, added, basis_size = basis.len());

            if added == 0 {
                break;
            }
        }

        let basis_size = basis.len();
        let basis = interreduce(basis)?;
        info!(passes, basis_size, reduced_size = basis.len(), "Buchberger end");
        Ok(basis)
    }
}
