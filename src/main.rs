use chrono::Local;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use generic_groebner::{
    buchberger::{DEFAULT_MAX_BASIS_SIZE, DEFAULT_MAX_PASSES},
    cyclic, default_names, format_system, is_groebner_basis,
    lcg::DEFAULT_SEED,
    parse_system, random_system, Buchberger, Coefficient, DenseMonomial, Double, GroebnerConfig,
    Lcg, Monomial, MonomialOrder, Modulus, PackedMonomial, Polynomial, RandomSystem, Single, GF,
};
use std::{
    error::Error,
    fs::{self, File},
    io::Write,
    path::PathBuf,
    time::Instant,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CoefficientKind {
    /// 64-bit floats, rounded to 5 digits
    Double,
    /// 32-bit floats, rounded to 5 digits
    Single,
    /// Integers modulo `--modulus`
    Modular,
    /// The prime field of order 2^64 - 59
    Gf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExponentKind {
    /// Exponent vector of any length
    Dense,
    /// Six 8-bit exponents in one machine word
    Packed,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Gröbner bases over a choice of coefficient fields")]
struct Args {
    #[arg(long, value_enum, default_value_t = CoefficientKind::Modular, global = true)]
    coefficient: CoefficientKind,

    #[arg(long, value_enum, default_value_t = ExponentKind::Dense, global = true)]
    exponent: ExponentKind,

    /// lex, grlex or revlex
    #[arg(long, default_value_t = MonomialOrder::Lex, global = true)]
    order: MonomialOrder,

    /// Prime modulus for `--coefficient modular`
    #[arg(long, default_value_t = 13, global = true)]
    modulus: u64,

    #[arg(long, default_value_t = DEFAULT_MAX_PASSES, global = true)]
    max_passes: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_BASIS_SIZE, global = true)]
    max_basis_size: usize,

    /// Write the basis here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Check that every S-polynomial of the result reduces to zero
    #[arg(long, global = true)]
    verify: bool,

    /// -v for debug logs, -vv for trace logs
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    input: Input,
}

#[derive(Subcommand, Debug)]
enum Input {
    /// A system drawn from the seeded linear congruential generator
    Random {
        #[arg(long, default_value_t = 3)]
        polynomials: usize,
        #[arg(long, default_value_t = 3)]
        terms: usize,
        #[arg(long, default_value_t = 3)]
        variables: usize,
        #[arg(long, default_value_t = 4)]
        max_exponent: u32,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: i64,
    },
    /// The cyclic-n system
    Cyclic { n: usize },
    /// A system in the `Defining ...` text format
    File { input: PathBuf },
}

fn now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.verbose > 0 {
        let level = if args.verbose > 1 {
            Level::TRACE
        } else {
            Level::DEBUG
        };
        let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match args.coefficient {
        CoefficientKind::Double => dispatch(&args, Double(0.0)),
        CoefficientKind::Single => dispatch(&args, Single(0.0)),
        CoefficientKind::Modular => dispatch(&args, Modulus::prime(args.modulus)?.zero()),
        CoefficientKind::Gf => dispatch(&args, GF::from(0u64)),
    }
}

fn dispatch<C: Coefficient>(args: &Args, proto: C) -> Result<(), Box<dyn Error>> {
    match args.exponent {
        ExponentKind::Dense => run::<C, DenseMonomial>(args, &proto),
        ExponentKind::Packed => run::<C, PackedMonomial>(args, &proto),
    }
}

fn load<C: Coefficient, M: Monomial>(
    args: &Args,
    proto: &C,
) -> Result<(Vec<String>, Vec<Polynomial<C, M>>), Box<dyn Error>> {
    let system = match &args.input {
        Input::Random {
            polynomials,
            terms,
            variables,
            max_exponent,
            seed,
        } => {
            let shape = RandomSystem {
                polynomials: *polynomials,
                terms: *terms,
                variables: *variables,
                max_exponent: *max_exponent,
            };
            let mut rng = Lcg::with_seed(*seed);
            (
                default_names(*variables),
                random_system(proto, &shape, args.order, &mut rng)?,
            )
        },
        Input::Cyclic { n } => (default_names(*n), cyclic(proto, *n, args.order)?),
        Input::File { input } => parse_system(&fs::read_to_string(input)?, proto, args.order)?,
    };
    Ok(system)
}

fn run<C: Coefficient, M: Monomial>(args: &Args, proto: &C) -> Result<(), Box<dyn Error>> {
    let config = GroebnerConfig {
        max_passes: args.max_passes,
        max_basis_size: args.max_basis_size,
    };
    let (names, generators) = load::<C, M>(args, proto)?;

    println!(
        "{} Computation start, {} generators, order {}",
        now(),
        generators.len(),
        args.order
    );
    let start_time = Instant::now();

    let basis = Buchberger::new(&generators, args.order, &config)?;

    println!(
        "{} Computation end, basis size {}, total time {:.3} seconds",
        now(),
        basis.len(),
        start_time.elapsed().as_secs_f64()
    );

    let text = format_system(&names, &basis);
    match &args.output {
        Some(path) => {
            let mut output = File::create(path)?;
            output.write_all(text.as_bytes())?;
            output.flush()?;
        },
        None => print!("{text}"),
    }

    if args.verify {
        let start_time = Instant::now();
        let verified = is_groebner_basis(&basis)?;
        println!(
            "{} Verification {}, total time {:.3} seconds",
            now(),
            if verified { "passed" } else { "failed" },
            start_time.elapsed().as_secs_f64()
        );
        if !verified {
            return Err("result is not a Gröbner basis".into());
        }
    }

    Ok(())
}
