use crate::{
    error::GroebnerError,
    field::Coefficient,
    poly::{monomial::Monomial, order::MonomialOrder},
};
use derivative::Derivative;
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    vec::Vec,
};

/// A coefficient attached to a monomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Term<C, M> {
    pub coefficient: C,
    pub monomial: M,
}

impl<C, M> Term<C, M> {
    pub fn new(coefficient: C, monomial: M) -> Self {
        Self {
            coefficient,
            monomial,
        }
    }
}

impl<C, M> From<(C, M)> for Term<C, M> {
    fn from((coefficient, monomial): (C, M)) -> Self {
        Self::new(coefficient, monomial)
    }
}

/// Sparse multivariate polynomial in canonical form.
///
/// Terms are sorted strictly descending under `order`, so `terms[0]` leads,
/// no monomial appears twice and every coefficient is the value
/// [`Coefficient::canonicalize`] kept. The empty term list is zero. Equality
/// and hashing look at the terms only.
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Hash(bound = ""),
    Debug(bound = ""),
    Default(bound = "")
)]
pub struct Polynomial<C: Coefficient, M: Monomial> {
    #[derivative(PartialEq = "ignore")]
    #[derivative(Hash = "ignore")]
    order: MonomialOrder,
    terms: Vec<Term<C, M>>,
}

impl<C: Coefficient, M: Monomial> Polynomial<C, M> {
    /// Sorts, merges equal monomials and drops what the coefficient field
    /// does not retain.
    pub fn new<T: Into<Term<C, M>>>(
        order: MonomialOrder,
        terms: impl IntoIterator<Item = T>,
    ) -> Self {
        let mut terms: Vec<Term<C, M>> = terms.into_iter().map(Into::into).collect();
        terms.sort_by(|a, b| order.compare(&b.monomial, &a.monomial));

        let mut merged: Vec<Term<C, M>> = Vec::with_capacity(terms.len());
        for term in terms {
            match merged.last_mut() {
                Some(prev) if prev.monomial == term.monomial => {
                    prev.coefficient = prev.coefficient.clone() + term.coefficient;
                },
                _ => merged.push(term),
            }
        }
        Self::from_sorted(order, merged)
    }

    /// `terms` must already be strictly descending under `order`.
    fn from_sorted(order: MonomialOrder, terms: Vec<Term<C, M>>) -> Self {
        let terms = terms
            .into_iter()
            .filter_map(|Term { coefficient, monomial }| {
                coefficient
                    .canonicalize()
                    .map(|coefficient| Term::new(coefficient, monomial))
            })
            .collect();
        Self { order, terms }
    }

    pub fn zero(order: MonomialOrder) -> Self {
        Self {
            order,
            terms: Vec::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[Term<C, M>] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<Term<C, M>> {
        self.terms
    }

    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_zero()
    }

    pub fn leading_term(&self) -> Option<&Term<C, M>> {
        self.terms.first()
    }

    pub fn leading_monomial(&self) -> Option<&M> {
        self.leading_term().map(|term| &term.monomial)
    }

    pub fn leading_coefficient(&self) -> Option<&C> {
        self.leading_term().map(|term| &term.coefficient)
    }

    pub fn trailing_terms(&self) -> &[Term<C, M>] {
        self.terms.get(1..).unwrap_or(&[])
    }

    /// Largest total degree of any term; zero for the zero polynomial.
    pub fn degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|term| term.monomial.degree())
            .max()
            .unwrap_or(0)
    }

    /// The same polynomial, re-sorted under another order.
    pub fn with_order(&self, order: MonomialOrder) -> Self {
        if order == self.order {
            return self.clone();
        }
        Self::new(order, self.terms.iter().cloned())
    }

    /// Merges two sorted term lists. `op` combines coefficients of equal
    /// monomials; a term only present in `other` enters as `op(0, c)`.
    fn combine(&self, other: &Self, op: impl Fn(C, C) -> C) -> Self {
        let converted;
        let other = if other.order == self.order {
            other
        } else {
            converted = other.with_order(self.order);
            &converted
        };

        let mut terms = Vec::with_capacity(self.terms.len() + other.terms.len());
        let (mut i, mut j) = (0, 0);
        loop {
            let which = match (self.terms.get(i), other.terms.get(j)) {
                (Some(lhs), Some(rhs)) => self.order.compare(&lhs.monomial, &rhs.monomial),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => break,
            };

            match which {
                Ordering::Greater => {
                    terms.push(self.terms[i].clone());
                    i += 1;
                },
                Ordering::Equal => {
                    let (lhs, rhs) = (&self.terms[i], &other.terms[j]);
                    terms.push(Term::new(
                        op(lhs.coefficient.clone(), rhs.coefficient.clone()),
                        lhs.monomial.clone(),
                    ));
                    i += 1;
                    j += 1;
                },
                Ordering::Less => {
                    let rhs = &other.terms[j];
                    terms.push(Term::new(
                        op(rhs.coefficient.zero_like(), rhs.coefficient.clone()),
                        rhs.monomial.clone(),
                    ));
                    j += 1;
                },
            }
        }
        Self::from_sorted(self.order, terms)
    }

    /// Scales every coefficient by `term.coefficient` and shifts every
    /// monomial by `term.monomial`. Monomial orders are compatible with
    /// multiplication, so the term order survives.
    ///
    /// Fails with [`GroebnerError::ExponentOverflow`] when a shifted
    /// exponent does not fit the monomial encoding.
    pub fn multiply_by_term(&self, term: &Term<C, M>) -> Result<Self, GroebnerError> {
        if term.coefficient.is_zero() {
            return Ok(Self::zero(self.order));
        }
        let terms = self
            .terms
            .iter()
            .map(|t| {
                Ok(Term::new(
                    t.coefficient.clone() * term.coefficient.clone(),
                    t.monomial.checked_mul(&term.monomial)?,
                ))
            })
            .collect::<Result<Vec<_>, GroebnerError>>()?;
        Ok(Self::from_sorted(self.order, terms))
    }

    /// Aligns both leading monomials to their lcm with unit multipliers and
    /// subtracts.
    pub fn s_polynomial(&self, other: &Self) -> Result<Self, GroebnerError> {
        let (lead_self, lead_other) = match (self.leading_term(), other.leading_term()) {
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            _ => return Err(GroebnerError::ZeroPolynomial),
        };
        let lcm = lead_self.monomial.lcm(&lead_other.monomial);
        let (Some(t_self), Some(t_other)) = (
            lcm.clone() / &lead_self.monomial,
            lcm / &lead_other.monomial,
        ) else {
            unreachable!("lcm is a multiple of both leading monomials");
        };

        let one = lead_self.coefficient.one_like();
        let scaled_self = self.multiply_by_term(&Term::new(one.clone(), t_self))?;
        let scaled_other = other.multiply_by_term(&Term::new(one, t_other))?;
        Ok(scaled_self - &scaled_other)
    }

    /// Multivariate division.
    ///
    /// While the remainder is non-zero, the first divisor whose leading
    /// monomial divides the remainder's leading monomial cancels it; the
    /// loop stops when no divisor does. Zero divisors are skipped. Returns
    /// one quotient per divisor and the remainder.
    pub fn div_mod(&self, divisors: &[Self]) -> Result<(Vec<Self>, Self), GroebnerError> {
        let mut quotients: Vec<Vec<Term<C, M>>> = vec![Vec::new(); divisors.len()];
        let mut remainder = self.clone();

        loop {
            let Some(lead) = remainder.leading_term() else {
                break;
            };
            let Some((index, divisor_lead, monomial)) =
                divisors.iter().enumerate().find_map(|(index, divisor)| {
                    let divisor_lead = divisor.leading_term()?;
                    let monomial = lead.monomial.clone() / &divisor_lead.monomial;
                    monomial.map(|monomial| (index, divisor_lead, monomial))
                })
            else {
                break;
            };

            let coefficient = lead.coefficient.try_div(&divisor_lead.coefficient)?;
            let term = Term::new(coefficient, monomial);
            remainder = &remainder - &divisors[index].multiply_by_term(&term)?;
            quotients[index].push(term);
        }

        let quotients = quotients
            .into_iter()
            .map(|terms| Self::new(self.order, terms))
            .collect();
        Ok((quotients, remainder))
    }

    /// Remainder of [`Polynomial::div_mod`].
    pub fn reduce(&self, divisors: &[Self]) -> Result<Self, GroebnerError> {
        self.div_mod(divisors).map(|(_, remainder)| remainder)
    }

    /// Displays with the given variable names, `x{i}` past the end of `names`.
    pub fn display_with<'a>(&'a self, names: &'a [String]) -> impl fmt::Display + 'a {
        Named { poly: self, names }
    }

    fn write_named(&self, f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (index, term) in self.terms.iter().enumerate() {
            let text = term.coefficient.to_string();
            let (negative, magnitude) = match text.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, text.as_str()),
            };
            match (index, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {},
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }

            let mut factors = Vec::new();
            if magnitude != "1" || term.monomial.is_constant() {
                factors.push(magnitude.to_owned());
            }
            for (var, exp) in term.monomial.exponents().into_iter().enumerate() {
                let name = names
                    .get(var)
                    .cloned()
                    .unwrap_or_else(|| format!("x{var}"));
                match exp {
                    0 => {},
                    1 => factors.push(name),
                    _ => factors.push(format!("{name}^{exp}")),
                }
            }
            write!(f, "{}", factors.join("*"))?;
        }
        Ok(())
    }
}

struct Named<'a, C: Coefficient, M: Monomial> {
    poly: &'a Polynomial<C, M>,
    names: &'a [String],
}

impl<C: Coefficient, M: Monomial> fmt::Display for Named<'_, C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.poly.write_named(f, self.names)
    }
}

impl<C: Coefficient, M: Monomial> fmt::Display for Polynomial<C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_named(f, &[])
    }
}

impl<C: Coefficient, M: Monomial> Neg for Polynomial<C, M> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for term in &mut self.terms {
            term.coefficient = -term.coefficient.clone();
        }
        self
    }
}

impl<'a, C: Coefficient, M: Monomial> Add<&'a Polynomial<C, M>> for &'_ Polynomial<C, M> {
    type Output = Polynomial<C, M>;

    fn add(self, rhs: &'a Polynomial<C, M>) -> Self::Output {
        self.combine(rhs, |a, b| a + b)
    }
}

impl<'a, C: Coefficient, M: Monomial> Add<&'a Self> for Polynomial<C, M> {
    type Output = Self;

    fn add(self, rhs: &'a Self) -> Self::Output {
        (&self).add(rhs)
    }
}

impl<'a, C: Coefficient, M: Monomial> AddAssign<&'a Self> for Polynomial<C, M> {
    fn add_assign(&mut self, rhs: &'a Self) {
        *self = (&*self).add(rhs);
    }
}

impl<'a, C: Coefficient, M: Monomial> Sub<&'a Polynomial<C, M>> for &'_ Polynomial<C, M> {
    type Output = Polynomial<C, M>;

    fn sub(self, rhs: &'a Polynomial<C, M>) -> Self::Output {
        self.combine(rhs, |a, b| a - b)
    }
}

impl<'a, C: Coefficient, M: Monomial> Sub<&'a Self> for Polynomial<C, M> {
    type Output = Self;

    fn sub(self, rhs: &'a Self) -> Self::Output {
        (&self).sub(rhs)
    }
}

impl<'a, C: Coefficient, M: Monomial> SubAssign<&'a Self> for Polynomial<C, M> {
    fn sub_assign(&mut self, rhs: &'a Self) {
        *self = (&*self).sub(rhs);
    }
}
