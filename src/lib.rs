#![allow(clippy::new_ret_no_self)]
#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::upper_case_acronyms)]

pub mod buchberger;
pub mod error;
pub mod field;
pub mod groebner;
pub mod lcg;
pub mod parse;
pub mod poly;
pub mod system;

mod proptests;

pub use crate::{
    buchberger::{Buchberger, GroebnerConfig},
    error::GroebnerError,
    field::{Coefficient, Double, Magnitude, ModInt, Modulus, Single},
    groebner::{ideal_contains, interreduce, is_groebner_basis},
    lcg::Lcg,
    parse::{default_names, format_system, parse_system},
    poly::{DenseMonomial, Monomial, MonomialOrder, PackedMonomial, Polynomial, Term},
    system::{cyclic, random_system, RandomSystem},
};

use ark_ff::fields::{Fp64, MontBackend, MontConfig};

#[derive(MontConfig)]
#[modulus = "18446744073709551557"]
#[generator = "2"]
pub struct FqConfig18446744073709551557;

/// The largest prime below `2^64`.
pub type GF = Fp64<MontBackend<FqConfig18446744073709551557, 1>>;

pub type DensePolynomial<C> = Polynomial<C, DenseMonomial>;
pub type PackedPolynomial<C> = Polynomial<C, PackedMonomial>;
