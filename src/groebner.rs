use crate::{
    error::GroebnerError,
    field::Coefficient,
    poly::{Monomial, Polynomial},
};
use hashbrown::HashSet;
use rayon::prelude::*;

/// Check whether the given ideal is a Gröbner basis: the S-polynomial of
/// every pair reduces to zero against the whole ideal.
///
/// Pairs are checked in parallel. `S(g, f)` is the negation of `S(f, g)`,
/// so each unordered pair is looked at once. Zero members are ignored.
pub fn is_groebner_basis<C: Coefficient, M: Monomial>(
    ideal: &[Polynomial<C, M>],
) -> Result<bool, GroebnerError> {
    let n = ideal.len();
    let failure = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| (i + 1..n).map(move |j| (i, j)))
        .filter(|&(i, j)| !ideal[i].is_zero() && !ideal[j].is_zero())
        .find_map_any(|(i, j)| {
            match ideal[i]
                .s_polynomial(&ideal[j])
                .and_then(|s| s.reduce(ideal))
            {
                Ok(remainder) if remainder.is_zero() => None,
                Ok(_) => Some(Ok(false)),
                Err(source) => Some(Err(GroebnerError::Pair {
                    i,
                    j,
                    source: Box::new(source),
                })),
            }
        });
    failure.unwrap_or(Ok(true))
}

/// Reduce each member against all the others and drop what vanishes.
///
/// The pass works in place: when member `i` is reduced, members before it
/// already take part in their reduced form. Two members sharing a leading
/// monomial therefore cannot cancel each other out. Zero results and
/// duplicates are removed, first occurrence kept.
pub fn interreduce<C: Coefficient, M: Monomial>(
    mut ideal: Vec<Polynomial<C, M>>,
) -> Result<Vec<Polynomial<C, M>>, GroebnerError> {
    for index in 0..ideal.len() {
        let g = std::mem::take(&mut ideal[index]);
        ideal[index] = g
            .reduce(&ideal)
            .map_err(|source| GroebnerError::SelfReduction {
                index,
                source: Box::new(source),
            })?;
    }

    let mut seen = HashSet::with_capacity(ideal.len());
    ideal.retain(|g| !g.is_zero() && seen.insert(g.clone()));
    Ok(ideal)
}

/// Ideal membership against a Gröbner basis: `f` reduces to zero.
pub fn ideal_contains<C: Coefficient, M: Monomial>(
    basis: &[Polynomial<C, M>],
    f: &Polynomial<C, M>,
) -> Result<bool, GroebnerError> {
    Ok(f.reduce(basis)?.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::Modulus,
        poly::{DenseMonomial, MonomialOrder},
        GF,
    };

    fn gf_poly(terms: &[(i64, &[u32])]) -> Polynomial<GF, DenseMonomial> {
        Polynomial::new(
            MonomialOrder::Lex,
            terms
                .iter()
                .map(|&(c, e)| (GF::from(c), DenseMonomial::new(e).unwrap())),
        )
    }

    #[test]
    fn test_is_groebner_basis() {
        // {x - y, y^2 - 1} is a Gröbner basis under Lex, {x - y, x - 1} is not.
        let basis = vec![
            gf_poly(&[(1, &[1, 0]), (-1, &[0, 1])]),
            gf_poly(&[(1, &[0, 2]), (-1, &[0, 0])]),
        ];
        assert!(is_groebner_basis(&basis).unwrap());

        let not_basis = vec![
            gf_poly(&[(1, &[1, 0]), (-1, &[0, 1])]),
            gf_poly(&[(1, &[1, 0]), (-1, &[0, 0])]),
        ];
        assert!(!is_groebner_basis(&not_basis).unwrap());

        assert!(is_groebner_basis::<GF, DenseMonomial>(&[]).unwrap());
    }

    #[test]
    fn test_is_groebner_basis_ignores_zero() {
        let basis = vec![
            gf_poly(&[(1, &[1, 0])]),
            Polynomial::zero(MonomialOrder::Lex),
            gf_poly(&[(1, &[0, 1])]),
        ];
        assert!(is_groebner_basis(&basis).unwrap());
    }

    #[test]
    fn test_is_groebner_basis_reports_division_failure() {
        let ring = Modulus::new(12).unwrap();
        let m = |e: &[u32]| DenseMonomial::new(e).unwrap();
        let basis = vec![
            Polynomial::new(MonomialOrder::Lex, vec![(ring.element(4), m(&[1, 0]))]),
            Polynomial::new(
                MonomialOrder::Lex,
                vec![(ring.element(6), m(&[1, 0])), (ring.one(), m(&[0, 1]))],
            ),
        ];
        assert!(matches!(
            is_groebner_basis(&basis),
            Err(GroebnerError::Pair { i: 0, j: 1, .. })
        ));
    }

    #[test]
    fn test_interreduce() {
        // x^2 and the first x vanish against the second x.
        let ideal = vec![
            gf_poly(&[(1, &[2, 0])]),
            gf_poly(&[(1, &[1, 0])]),
            gf_poly(&[(1, &[0, 1]), (-1, &[0, 0])]),
            gf_poly(&[(1, &[1, 0])]),
        ];
        let reduced = interreduce(ideal).unwrap();
        assert_eq!(
            reduced,
            vec![gf_poly(&[(1, &[0, 1]), (-1, &[0, 0])]), gf_poly(&[(1, &[1, 0])])]
        );
    }

    #[test]
    fn test_interreduce_same_leading_monomial() {
        // x + y and x - y: the first becomes 2y, the second then stays.
        let ideal = vec![
            gf_poly(&[(1, &[1, 0]), (1, &[0, 1])]),
            gf_poly(&[(1, &[1, 0]), (-1, &[0, 1])]),
        ];
        let reduced = interreduce(ideal).unwrap();
        assert_eq!(
            reduced,
            vec![
                gf_poly(&[(2, &[0, 1])]),
                gf_poly(&[(1, &[1, 0]), (-1, &[0, 1])]),
            ]
        );
    }

    #[test]
    fn test_interreduce_reports_index() {
        let ring = Modulus::new(12).unwrap();
        let m = |e: &[u32]| DenseMonomial::new(e).unwrap();
        let ideal = vec![
            Polynomial::new(MonomialOrder::Lex, vec![(ring.element(4), m(&[1]))]),
            Polynomial::new(MonomialOrder::Lex, vec![(ring.element(3), m(&[2]))]),
        ];
        assert!(matches!(
            interreduce(ideal),
            Err(GroebnerError::SelfReduction { index: 1, .. })
        ));
    }

    #[test]
    fn test_ideal_contains() {
        let basis = vec![
            gf_poly(&[(1, &[1, 0]), (-1, &[0, 1])]),
            gf_poly(&[(1, &[0, 2]), (-1, &[0, 0])]),
        ];
        // x^2 - 1 = (x + y)(x - y) + (y^2 - 1)
        assert!(ideal_contains(&basis, &gf_poly(&[(1, &[2, 0]), (-1, &[0, 0])])).unwrap());
        assert!(!ideal_contains(&basis, &gf_poly(&[(1, &[1, 0]), (-1, &[0, 0])])).unwrap());
    }
}
