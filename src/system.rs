//! Generator systems used as inputs: seeded random systems and cyclic-n.

use crate::{
    error::GroebnerError,
    field::Coefficient,
    lcg::Lcg,
    poly::{Monomial, MonomialOrder, Polynomial, Term},
};

/// Shape of a random system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomSystem {
    pub polynomials: usize,
    pub terms: usize,
    pub variables: usize,
    /// Exponents are drawn from `0..max_exponent`.
    pub max_exponent: u32,
}

impl Default for RandomSystem {
    fn default() -> Self {
        Self {
            polynomials: 3,
            terms: 3,
            variables: 3,
            max_exponent: 4,
        }
    }
}

/// Draws `shape.polynomials` polynomials from `rng`.
///
/// Every term takes one coefficient draw followed by one exponent draw per
/// variable. Exact fields map `next_int` into the field, floating point
/// fields take `next_double`. `proto` supplies the field context.
pub fn random_system<C: Coefficient, M: Monomial>(
    proto: &C,
    shape: &RandomSystem,
    order: MonomialOrder,
    rng: &mut Lcg,
) -> Result<Vec<Polynomial<C, M>>, GroebnerError> {
    if shape.max_exponent == 0 {
        return Err(GroebnerError::config("max_exponent must be positive"));
    }

    let mut system = Vec::with_capacity(shape.polynomials);
    for _ in 0..shape.polynomials {
        let mut terms = Vec::with_capacity(shape.terms);
        for _ in 0..shape.terms {
            let coefficient = if C::EXACT {
                proto.from_int_like(rng.next_int())
            } else {
                proto.from_float_like(rng.next_double())
            };
            let exponents: Vec<u32> = (0..shape.variables)
                .map(|_| rng.next_int().rem_euclid(shape.max_exponent as i64) as u32)
                .collect();
            terms.push(Term::new(coefficient, M::new(&exponents)?));
        }
        system.push(Polynomial::new(order, terms));
    }
    Ok(system)
}

/// The cyclic-n system in `x0, ..., x(n-1)`.
///
/// For `k` in `1..n` the sum over all `n` cyclic windows of `k` consecutive
/// variables, then `x0 * ... * x(n-1) - 1`.
pub fn cyclic<C: Coefficient, M: Monomial>(
    proto: &C,
    n: usize,
    order: MonomialOrder,
) -> Result<Vec<Polynomial<C, M>>, GroebnerError> {
    if n == 0 {
        return Err(GroebnerError::config("cyclic system needs at least one variable"));
    }
    let one = proto.one_like();

    let mut system = Vec::with_capacity(n);
    for k in 1..n {
        let terms = (0..n)
            .map(|start| {
                let mut exponents = vec![0u32; n];
                for offset in 0..k {
                    exponents[(start + offset) % n] += 1;
                }
                M::new(&exponents).map(|monomial| Term::new(one.clone(), monomial))
            })
            .collect::<Result<Vec<_>, _>>()?;
        system.push(Polynomial::new(order, terms));
    }
    system.push(Polynomial::new(
        order,
        [
            Term::new(one.clone(), M::new(&vec![1u32; n])?),
            Term::new(-one, M::new(&vec![0u32; n])?),
        ],
    ));
    Ok(system)
}
