//! rlogit Command Line Interface
//!
//! Trains a logistic regression classifier on a random split of the Iris
//! dataset, prints the held-out accuracy, then classifies one flower
//! measured by the user.

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info};
use rlogit::core::{DenseVector, OptimizerConfig, Result, SolverKind};
use rlogit::demo::{run_demo, DemoConfig};
use rlogit::input::{parse_measurement, prompt_measurements, InputCoercion, MEASUREMENT_PROMPTS};
use rlogit::utils::scaling::ScalingMethod;
use rlogit::IrisDataset;
use std::io;
use std::process;

#[derive(Parser)]
#[command(name = "rlogit")]
#[command(about = "Classify an Iris flower with multinomial logistic regression")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "rlogit contributors")]
struct Cli {
    /// Fraction of the dataset held out for scoring
    #[arg(long, default_value = "0.1")]
    test_size: f64,

    /// Seed for the train/test shuffle (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Inverse regularization strength
    #[arg(short = 'C', long, default_value = "1.0")]
    c: f64,

    /// Convergence tolerance on the gradient
    #[arg(long, default_value = "0.0001")]
    tolerance: f64,

    /// Maximum solver iterations
    #[arg(short, long, default_value = "10000")]
    max_iterations: usize,

    /// Solver used for fitting
    #[arg(long, default_value = "lbfgs")]
    solver: CliSolver,

    /// Step size for gradient descent
    #[arg(long, default_value = "0.5")]
    learning_rate: f64,

    /// Feature scaling method
    #[arg(long)]
    feature_scaling: Option<CliScalingMethod>,

    /// Only accept whole-number measurements, truncating precision like the classic script
    #[arg(long)]
    legacy_integer_input: bool,

    /// Measurements to classify (sepal length, sepal width, petal length, petal width); prompts when omitted
    #[arg(long, num_args = 4, value_names = ["SEPAL_LENGTH", "SEPAL_WIDTH", "PETAL_LENGTH", "PETAL_WIDTH"], allow_negative_numbers = true)]
    query: Option<Vec<String>>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum CliSolver {
    /// Limited-memory BFGS (default)
    #[value(name = "lbfgs")]
    Lbfgs,
    /// Fixed-step gradient descent
    #[value(name = "gradient-descent")]
    GradientDescent,
}

#[derive(ValueEnum, Clone, Debug)]
enum CliScalingMethod {
    /// Min-Max scaling to [-1, 1] range
    #[value(name = "minmax")]
    MinMax,
    /// Standard score (Z-score) normalization
    #[value(name = "standard")]
    StandardScore,
    /// Unit scaling by maximum absolute value
    #[value(name = "unit")]
    UnitScale,
}

impl From<CliScalingMethod> for ScalingMethod {
    fn from(cli_method: CliScalingMethod) -> Self {
        match cli_method {
            CliScalingMethod::MinMax => ScalingMethod::MinMax {
                min_val: -1.0,
                max_val: 1.0,
            },
            CliScalingMethod::StandardScore => ScalingMethod::StandardScore,
            CliScalingMethod::UnitScale => ScalingMethod::UnitScale,
        }
    }
}

impl From<CliSolver> for SolverKind {
    fn from(cli_solver: CliSolver) -> Self {
        match cli_solver {
            CliSolver::Lbfgs => SolverKind::Lbfgs,
            CliSolver::GradientDescent => SolverKind::GradientDescent,
        }
    }
}

impl Cli {
    fn demo_config(&self) -> DemoConfig {
        DemoConfig {
            test_size: self.test_size,
            seed: self.seed,
            coercion: if self.legacy_integer_input {
                InputCoercion::Integer
            } else {
                InputCoercion::Float
            },
            optimizer: OptimizerConfig {
                c: self.c,
                tolerance: self.tolerance,
                max_iterations: self.max_iterations,
                solver: self.solver.clone().into(),
                learning_rate: self.learning_rate,
                feature_scaling: self.feature_scaling.clone().map(Into::into),
                ..OptimizerConfig::default()
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(&cli) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.demo_config();
    let dataset = IrisDataset::load();

    let query = match &cli.query {
        Some(values) => {
            let parsed = MEASUREMENT_PROMPTS
                .iter()
                .zip(values)
                .map(|((field, _), raw)| parse_measurement(field, raw, config.coercion))
                .collect::<Result<Vec<f64>>>()?;
            DenseVector::new(parsed)
        }
        None => {
            let stdin = io::stdin();
            prompt_measurements(&mut stdin.lock(), &mut io::stderr(), config.coercion)?
        }
    };
    info!("Query measurements: {:?}", query.as_slice());

    let report = run_demo(&dataset, &query, &config)?;
    report.write_to(&mut io::stdout().lock())?;

    Ok(())
}
