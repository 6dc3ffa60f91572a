use tableau_simplex::{PrimalSimplexSolver, Problem, SimplexError, SolverResult};

use clap::{ArgAction, Parser, ValueEnum};
use log::info;

use std::path::PathBuf;
use std::process::ExitCode;

/// Solve `max cᵀx` subject to `Ax ≤ b`, `x ≥ 0` with the tableau simplex method.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// MPS model to solve (only L rows and nonnegative columns)
    #[arg(conflicts_with = "example")]
    mps: Option<PathBuf>,

    /// Built-in sample problem to solve when no MPS model is given
    #[arg(short, long, value_enum, default_value_t = Example::Exercise29_3_6)]
    example: Example,

    /// Stop after this many pivots
    #[arg(long)]
    max_iter: Option<u64>,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Example {
    #[value(name = "clrs-29-3")]
    Clrs29_3,
    #[value(name = "exercise-29-3-5")]
    Exercise29_3_5,
    #[value(name = "exercise-29-3-6")]
    Exercise29_3_6,
}

impl Example {
    fn problem(self) -> Result<Problem, SimplexError> {
        match self {
            Example::Clrs29_3 => Problem::from_dense(
                &[vec![1., 1., 3.], vec![2., 2., 5.], vec![4., 1., 2.]],
                &[30., 24., 36.],
                &[3., 1., 2.],
            ),

            Example::Exercise29_3_5 => Problem::from_dense(
                &[vec![1., 1.], vec![1., 0.], vec![0., 1.]],
                &[20., 12., 16.],
                &[18., 12.5],
            ),

            Example::Exercise29_3_6 => Problem::from_dense(
                &[vec![1., -1.], vec![2., 1.]],
                &[1., 2.],
                &[5., -3.],
            ),
        }
    }
}

fn setup_logger(log_level: log::LevelFilter) -> Result<(), fern::InitError> {
    use fern::colors::{Color, ColoredLevelConfig};
    let colors = ColoredLevelConfig::new()
        .debug(Color::White)
        .info(Color::Green)
        .warn(Color::BrightYellow)
        .error(Color::BrightRed);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} | {:5} | {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                colors.color(record.level()),
                message
            ))
        })
        .level(log_level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn load_problem(args: &Args) -> Result<Problem, SimplexError> {
    match &args.mps {
        Some(path) => {
            info!("reading {}", path.display());

            let mps = std::fs::read_to_string(path).map_err(|err| {
                SimplexError::new(format!("could not read {}: {}", path.display(), err))
            })?;

            tableau_simplex::parse_mps(&mps)
        }

        None => {
            info!("solving built-in example {:?}", args.example);
            args.example.problem()
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Err(err) = setup_logger(log_level) {
        eprintln!("could not set up logging: {}", err);
    }

    let result = load_problem(&args).and_then(|prob| {
        info!("\n{}", prob);
        PrimalSimplexSolver::new(args.max_iter).solve(&prob)
    });

    match result {
        Ok(result @ SolverResult::MaxIter { .. }) => {
            println!("{}", result);
            ExitCode::FAILURE
        }

        Ok(result) => {
            if let Some(sol) = result.solution() {
                info!(
                    "objective value {} after {} pivots",
                    sol.obj(),
                    sol.iterations()
                );
            }

            println!("{}", result);
            ExitCode::SUCCESS
        }

        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
