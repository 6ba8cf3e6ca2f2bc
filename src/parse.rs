//! Text format for polynomial systems.
//!
//! ```text
//! Defining x, y, z
//! [x^3 + y^3 + z^3, x*y + y*z + x*z, x + y + z]
//! ```
//!
//! Terms are `coefficient*var^exp*...` joined by `+` or `-`; a missing
//! coefficient is 1 and a missing exponent is 1.

use crate::{
    error::GroebnerError,
    field::Coefficient,
    poly::{Monomial, MonomialOrder, Polynomial, Term},
};
use fancy_regex::Regex;
use hashbrown::HashMap;
use once_cell::sync::Lazy;

/// Zero-width split before every sign, except the sign of a float exponent
/// such as `1.5e-3`.
static TERM_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?<![0-9.][eE])(?=[+-])").expect("term split pattern"));

/// Decimal digits folded into one `i64` per step.
const DIGIT_CHUNK: usize = 18;

/// Reads a system, returning the variable names and the polynomials.
///
/// `proto` supplies the coefficient field context.
pub fn parse_system<C: Coefficient, M: Monomial>(
    text: &str,
    proto: &C,
    order: MonomialOrder,
) -> Result<(Vec<String>, Vec<Polynomial<C, M>>), GroebnerError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| GroebnerError::parse("empty input"))?;
    let names = parse_header(header)?;

    let body = lines.collect::<Vec<_>>().join(" ");
    let list = body
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| GroebnerError::parse("expected a bracketed polynomial list"))?;

    let polynomials = if list.trim().is_empty() {
        Vec::new()
    } else {
        let index: HashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        list.split(',')
            .map(|poly| parse_polynomial(poly, &index, names.len(), proto, order))
            .collect::<Result<Vec<_>, _>>()?
    };
    Ok((names, polynomials))
}

fn parse_header(line: &str) -> Result<Vec<String>, GroebnerError> {
    let rest = line
        .strip_prefix("Defining")
        .ok_or_else(|| GroebnerError::parse(format!("expected `Defining ...`, got `{line}`")))?;

    let names: Vec<String> = rest
        .split(',')
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect();
    for (i, name) in names.iter().enumerate() {
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_')
            || name.starts_with(|c: char| c.is_ascii_digit())
        {
            return Err(GroebnerError::parse(format!("invalid variable name `{name}`")));
        }
        if names[..i].contains(name) {
            return Err(GroebnerError::parse(format!("variable `{name}` defined twice")));
        }
    }
    Ok(names)
}

/// Splits a polynomial into signed term bodies. Sign-only pieces, as in
/// `x + -y`, fold into the following term.
fn split_terms(text: &str) -> Result<Vec<(bool, &str)>, GroebnerError> {
    let mut bounds = vec![0];
    for found in TERM_SPLIT.find_iter(text) {
        let found = found.map_err(|err| GroebnerError::parse(err.to_string()))?;
        bounds.push(found.start());
    }
    bounds.push(text.len());

    let mut terms = Vec::new();
    let mut negative = false;
    let mut pending = false;
    for window in bounds.windows(2) {
        let mut piece = text[window[0]..window[1]].trim();
        if let Some(rest) = piece.strip_prefix('-') {
            negative = !negative;
            pending = true;
            piece = rest.trim();
        } else if let Some(rest) = piece.strip_prefix('+') {
            pending = true;
            piece = rest.trim();
        }
        if piece.is_empty() {
            continue;
        }
        terms.push((negative, piece));
        negative = false;
        pending = false;
    }
    if pending {
        return Err(GroebnerError::parse(format!("dangling sign in `{}`", text.trim())));
    }
    Ok(terms)
}

fn parse_polynomial<C: Coefficient, M: Monomial>(
    text: &str,
    index: &HashMap<&str, usize>,
    variables: usize,
    proto: &C,
    order: MonomialOrder,
) -> Result<Polynomial<C, M>, GroebnerError> {
    let pieces = split_terms(text)?;
    if pieces.is_empty() {
        return Err(GroebnerError::parse("empty polynomial"));
    }

    let mut terms = Vec::with_capacity(pieces.len());
    for (negative, body) in pieces {
        let mut coefficient = proto.one_like();
        let mut exponents = vec![0u32; variables];
        for factor in body.split('*').map(str::trim) {
            if factor.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                coefficient = coefficient * parse_number(proto, factor)?;
                continue;
            }
            let (name, exp) = match factor.split_once('^') {
                Some((name, exp)) => (
                    name.trim(),
                    exp.trim().parse::<u32>().map_err(|err| {
                        GroebnerError::parse(format!("bad exponent in `{factor}`: {err}"))
                    })?,
                ),
                None => (factor, 1),
            };
            let var = index
                .get(name)
                .ok_or_else(|| GroebnerError::parse(format!("unknown variable `{name}`")))?;
            exponents[*var] = exponents[*var].checked_add(exp).ok_or_else(|| {
                GroebnerError::parse(format!("exponent overflow for `{name}` in `{body}`"))
            })?;
        }
        if negative {
            coefficient = -coefficient;
        }
        terms.push(Term::new(coefficient, M::new(&exponents)?));
    }
    Ok(Polynomial::new(order, terms))
}

/// Integers are read exactly in any field. Decimals become floats in an
/// inexact field and `digits / 10^k` in an exact one.
fn parse_number<C: Coefficient>(proto: &C, text: &str) -> Result<C, GroebnerError> {
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(parse_integer(proto, text));
    }
    if !C::EXACT {
        let value = text
            .parse::<f64>()
            .map_err(|err| GroebnerError::parse(format!("bad number `{text}`: {err}")))?;
        return Ok(proto.from_float_like(value));
    }

    let (whole, fraction) = text
        .split_once('.')
        .filter(|(whole, fraction)| {
            !(whole.is_empty() && fraction.is_empty())
                && whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
        })
        .ok_or_else(|| GroebnerError::parse(format!("bad number `{text}` for an exact field")))?;
    let numerator = parse_integer(proto, &format!("{whole}{fraction}"));
    let denominator = parse_integer(proto, &format!("1{}", "0".repeat(fraction.len())));
    numerator.try_div(&denominator)
}

fn parse_integer<C: Coefficient>(proto: &C, digits: &str) -> C {
    digits
        .as_bytes()
        .chunks(DIGIT_CHUNK)
        .fold(proto.zero_like(), |acc, chunk| {
            let value = chunk
                .iter()
                .fold(0i64, |v, &b| v * 10 + (b - b'0') as i64);
            let scale = proto.from_int_like(10i64.pow(chunk.len() as u32));
            acc * scale + proto.from_int_like(value)
        })
}

/// Writes a system in the format [`parse_system`] reads.
pub fn format_system<C: Coefficient, M: Monomial>(
    names: &[String],
    polynomials: &[Polynomial<C, M>],
) -> String {
    let list = polynomials
        .iter()
        .map(|poly| poly.display_with(names).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Defining {}\n[{}]\n", names.join(", "), list)
}

/// `x0, x1, ...`
pub fn default_names(variables: usize) -> Vec<String> {
    (0..variables).map(|i| format!("x{i}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::{Double, Modulus},
        poly::{DenseMonomial, PackedMonomial},
        GF,
    };

    const SYSTEM: &str = "Defining x, y, z\n[x^3 + y^3 + z^3, x*y + y*z + x*z, x + y + z]\n";

    fn m(exponents: &[u32]) -> DenseMonomial {
        DenseMonomial::new(exponents).unwrap()
    }

    #[test]
    fn test_parse_system() {
        let p = Modulus::prime(13).unwrap();
        let (names, polys) =
            parse_system::<_, DenseMonomial>(SYSTEM, &p.zero(), MonomialOrder::Lex).unwrap();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(polys.len(), 3);
        assert_eq!(
            polys[1],
            Polynomial::new(
                MonomialOrder::Lex,
                vec![(p.one(), m(&[1, 1, 0])), (p.one(), m(&[0, 1, 1])), (p.one(), m(&[1, 0, 1]))]
            )
        );
    }

    #[test]
    fn test_parse_coefficients_and_signs() {
        let text = "Defining a, b\n[-2*a^2*b + 3 - b, a + -b, 2*3*a - a]";
        let p = Modulus::prime(13).unwrap();
        let (_, polys) =
            parse_system::<_, DenseMonomial>(text, &p.zero(), MonomialOrder::GrLex).unwrap();
        assert_eq!(
            polys[0],
            Polynomial::new(
                MonomialOrder::GrLex,
                vec![
                    (p.element(-2), m(&[2, 1])),
                    (p.element(-1), m(&[0, 1])),
                    (p.element(3), m(&[0, 0])),
                ]
            )
        );
        assert_eq!(
            polys[1],
            Polynomial::new(
                MonomialOrder::GrLex,
                vec![(p.one(), m(&[1, 0])), (p.element(-1), m(&[0, 1]))]
            )
        );
        assert_eq!(
            polys[2],
            Polynomial::new(MonomialOrder::GrLex, vec![(p.element(5), m(&[1, 0]))])
        );
    }

    #[test]
    fn test_parse_numbers() {
        let p = Modulus::prime(13).unwrap();
        assert_eq!(parse_number(&p.zero(), "0.5"), Ok(p.element(7)));
        assert_eq!(parse_number(&p.zero(), "27"), Ok(p.element(1)));
        assert!(parse_number(&p.zero(), "1e3").is_err());
        assert_eq!(parse_number(&Double(0.0), "1.5e-1"), Ok(Double(0.15)));
        assert_eq!(
            parse_integer(&GF::from(0u64), "18446744073709551558"),
            GF::from(1u64)
        );
    }

    #[test]
    fn test_parse_float_exponent_is_not_a_term() {
        let text = "Defining x\n[1.5e-1*x + 2]";
        let (_, polys) =
            parse_system::<_, DenseMonomial>(text, &Double(0.0), MonomialOrder::Lex).unwrap();
        assert_eq!(
            polys[0],
            Polynomial::new(
                MonomialOrder::Lex,
                vec![(Double(0.15), m(&[1])), (Double(2.0), m(&[0]))]
            )
        );
    }

    #[test]
    fn test_parse_errors() {
        let proto = Double(0.0);
        let parse = |text: &str| {
            parse_system::<_, DenseMonomial>(text, &proto, MonomialOrder::Lex).map(|_| ())
        };
        assert!(matches!(parse(""), Err(GroebnerError::Parse(_))));
        assert!(matches!(parse("[x + 1]"), Err(GroebnerError::Parse(_))));
        assert!(matches!(parse("Defining x, x\n[x]"), Err(GroebnerError::Parse(_))));
        assert!(matches!(parse("Defining x\nx + 1"), Err(GroebnerError::Parse(_))));
        assert!(matches!(parse("Defining x\n[x + w]"), Err(GroebnerError::Parse(_))));
        assert!(matches!(parse("Defining x\n[x^-1]"), Err(GroebnerError::Parse(_))));
        assert!(matches!(parse("Defining x\n[x, ]"), Err(GroebnerError::Parse(_))));
        assert!(matches!(parse("Defining x\n[x +]"), Err(GroebnerError::Parse(_))));
        assert_eq!(parse("Defining x\n[]"), Ok(()));
    }

    #[test]
    fn test_parse_exponent_overflow() {
        let proto = Modulus::prime(13).unwrap().zero();
        let result = parse_system::<_, DenseMonomial>(
            "Defining x\n[x^4294967295*x]",
            &proto,
            MonomialOrder::Lex,
        );
        assert!(matches!(result, Err(GroebnerError::Parse(_))));

        let (_, polys) = parse_system::<_, DenseMonomial>(
            "Defining x\n[x^4294967294*x]",
            &proto,
            MonomialOrder::Lex,
        )
        .unwrap();
        assert_eq!(polys[0].terms()[0].monomial.exponents(), vec![u32::MAX]);
    }

    #[test]
    fn test_packed_capacity_is_checked() {
        let text = "Defining a, b, c, d, e, f, g\n[a*g]";
        let result = parse_system::<_, PackedMonomial>(text, &Double(0.0), MonomialOrder::Lex);
        assert!(matches!(result, Err(GroebnerError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_round_trip() {
        let p = Modulus::prime(13).unwrap();
        let (names, polys) =
            parse_system::<_, PackedMonomial>(SYSTEM, &p.zero(), MonomialOrder::RevLex).unwrap();
        let text = format_system(&names, &polys);
        let (names2, polys2) =
            parse_system::<_, PackedMonomial>(&text, &p.zero(), MonomialOrder::RevLex).unwrap();
        assert_eq!(names, names2);
        assert_eq!(polys, polys2);

        let floats: Vec<Polynomial<Double, DenseMonomial>> = vec![Polynomial::new(
            MonomialOrder::Lex,
            vec![
                (Double(-0.33333), m(&[2, 0])),
                (Double(12.5), m(&[1, 1])),
                (Double(-1.0), m(&[0, 0])),
            ],
        )];
        let names = default_names(2);
        let text = format_system(&names, &floats);
        assert_eq!(text, "Defining x0, x1\n[-0.33333*x0^2 + 12.5*x0*x1 - 1]\n");
        let (_, parsed) =
            parse_system::<_, DenseMonomial>(&text, &Double(0.0), MonomialOrder::Lex).unwrap();
        assert_eq!(parsed, floats);
    }
}
