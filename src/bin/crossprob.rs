use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};

use crossprob::boundaries::{BoundaryPair, read_boundaries_file};
use crossprob::core::{BoundarySide, ConvolutionMethod, CrossingOptions};
use crossprob::engines::{BlockJumpPropagator, PropagationWorkspace, TwoSidedPropagator};
use crossprob::mc::CrossingMonteCarlo;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum McProcess {
    /// Empirical CDF of n uniform samples.
    Ecdf,
    /// Homogeneous Poisson process on [0, 1].
    Poisson,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Exact boundary crossing probabilities for empirical CDFs and Poisson processes",
    long_about = "Boundary files hold two comma-separated lines: the lower boundary \
                  b_1, ..., b_n (X_(i) >= b_i) and the upper boundary B_1, ..., B_n \
                  (X_(i) <= B_i). An empty line means no constraint."
)]
struct Args {
    /// Print the crossing probability 1 - p instead of the noncrossing probability p
    #[arg(long, global = true)]
    crossing: bool,

    /// JSON file with engine options (convolution method, FFT threshold, block size)
    #[arg(long, global = true, value_name = "JSON")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Two-sided probability for the empirical CDF of n samples
    Ecdf2 {
        n: usize,
        file: PathBuf,
        /// Use O(n^2) direct convolutions instead of FFT
        #[arg(long)]
        direct: bool,
    },
    /// One-sided probability; exactly one line of the file must be non-empty
    Ecdf1 {
        n: usize,
        file: PathBuf,
        /// Steps per block (defaults to floor(sqrt(n)) + 1)
        #[arg(long, value_name = "K")]
        block_size: Option<usize>,
    },
    /// Probability for a Poisson process of the given intensity
    Poisson {
        intensity: f64,
        file: PathBuf,
        /// Joint probability with N(1) = K
        #[arg(long, value_name = "K")]
        endpoint: Option<usize>,
        /// Use O(n^2) direct convolutions instead of FFT
        #[arg(long)]
        direct: bool,
    },
    /// Monte Carlo estimate
    Mc {
        #[arg(value_enum)]
        process: McProcess,
        /// Sample size for `ecdf`, intensity for `poisson`
        parameter: f64,
        file: PathBuf,
        #[arg(long, default_value_t = 100_000)]
        simulations: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load_options(path: Option<&Path>) -> anyhow::Result<CrossingOptions> {
    match path {
        Some(path) => CrossingOptions::from_json_file(path)
            .with_context(|| format!("failed to load options from {}", path.display())),
        None => Ok(CrossingOptions::default()),
    }
}

fn load_boundaries(path: &Path) -> anyhow::Result<BoundaryPair> {
    read_boundaries_file(path)
        .with_context(|| format!("failed to read boundaries from {}", path.display()))
}

fn one_sided(pair: BoundaryPair) -> anyhow::Result<(Vec<f64>, BoundarySide)> {
    match (pair.lower.is_empty(), pair.upper.is_empty()) {
        (false, true) => Ok((pair.lower, BoundarySide::Lower)),
        (true, false) => Ok((pair.upper, BoundarySide::Upper)),
        (false, false) => bail!("one-sided mode needs exactly one boundary, found both"),
        (true, true) => bail!("one-sided mode needs exactly one boundary, found none"),
    }
}

fn sample_size(parameter: f64) -> anyhow::Result<usize> {
    if parameter < 0.0 || parameter.fract() != 0.0 || !parameter.is_finite() {
        bail!("sample size must be a non-negative integer, got {parameter}");
    }
    Ok(parameter as usize)
}

fn report(p: f64, crossing: bool) {
    let value = if crossing { 1.0 - p } else { p };
    println!("{value:.15e}");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut options = load_options(args.config.as_deref())?;

    match args.command {
        Command::Ecdf2 { n, file, direct } => {
            if direct {
                options.convolution = ConvolutionMethod::Direct;
            }
            let pair = load_boundaries(&file)?;
            let mut workspace = PropagationWorkspace::new(n + 1, &options);
            let p = TwoSidedPropagator::new(&mut workspace).ecdf_noncrossing_probability(
                n,
                &pair.lower,
                &pair.upper,
            )?;
            report(p, args.crossing);
        }
        Command::Ecdf1 {
            n,
            file,
            block_size,
        } => {
            let (boundary, side) = one_sided(load_boundaries(&file)?)?;
            let mut workspace = PropagationWorkspace::new(n + 1, &options);
            let p = BlockJumpPropagator::new(&mut workspace).one_sided_noncrossing_probability(
                n, &boundary, side, block_size,
            )?;
            report(p, args.crossing);
        }
        Command::Poisson {
            intensity,
            file,
            endpoint,
            direct,
        } => {
            if direct {
                options.convolution = ConvolutionMethod::Direct;
            }
            let pair = load_boundaries(&file)?;
            let mut workspace = PropagationWorkspace::new(pair.lower.len() + 1, &options);
            let p = TwoSidedPropagator::new(&mut workspace).poisson_noncrossing_probability(
                intensity,
                &pair.lower,
                &pair.upper,
                endpoint,
            )?;
            report(p, args.crossing);
        }
        Command::Mc {
            process,
            parameter,
            file,
            simulations,
            seed,
        } => {
            let pair = load_boundaries(&file)?;
            let engine = CrossingMonteCarlo {
                num_simulations: simulations,
                seed,
            };
            let estimate = match process {
                McProcess::Ecdf => {
                    engine.run_ecdf(sample_size(parameter)?, &pair.lower, &pair.upper)?
                }
                McProcess::Poisson => engine.run_poisson(parameter, &pair.lower, &pair.upper)?,
            };
            let value = if args.crossing {
                1.0 - estimate.probability
            } else {
                estimate.probability
            };
            println!(
                "{value:.6} +/- {:.6} ({} simulations)",
                estimate.std_error, estimate.num_simulations
            );
        }
    }

    Ok(())
}
