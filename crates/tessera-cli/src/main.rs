// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tessera CLI entrypoint.
//!
//! Developer-facing commands for poking at `tessera-linalg` from the shell.
//! Every command reads a square matrix (2x2 up to 6x6) from a JSON file:
//!
//! ```json
//! { "rows": [[2.0, 0.0], [0.0, 4.0]] }
//! ```
//!
//! # Usage
//! ```text
//! tessera [--config FILE] [--strict] [-v] <command> <file> [options]
//! ```
//!
//! - `show`: the matrix, its determinant, and whether it is symmetric or
//!   equivalent to the identity.
//! - `invert [--method auto|closed|gauss|lu]`: the inverse.
//! - `solve --rhs a,b,..`: the solution of `A x = b`.
//! - `transform --point x,y,z | --dir x,y,z`: applies a 4x4 transform.
//!
//! By default degenerate input prints the library's fallback value (identity,
//! adjugate, unchanged matrix). `--strict` turns those cases into errors. The
//! process exits non-zero on any error.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tessera_linalg::{LuFactors, Mat2, Mat3, Mat4, MatN, NumericConfig, SingularPolicy};

#[derive(Parser, Debug)]
#[command(name = "tessera", author, version, about, long_about = None)]
struct Cli {
    /// JSON file with numeric tolerances and the singular-input policy
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report degenerate input as an error instead of a fallback value
    #[arg(long, global = true)]
    strict: bool,

    /// Log the fallbacks taken by the library (debug level, stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a matrix with its determinant and symmetry
    Show {
        /// Matrix JSON file
        file: PathBuf,
    },
    /// Print the inverse of a matrix
    Invert {
        /// Matrix JSON file
        file: PathBuf,
        /// Inversion algorithm
        #[arg(long, value_enum, default_value_t = Method::Auto)]
        method: Method,
    },
    /// Solve `A x = b` through an LU decomposition
    Solve {
        /// Matrix JSON file
        file: PathBuf,
        /// Right-hand side, comma separated
        #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
        rhs: Vec<f64>,
    },
    /// Apply a 4x4 transform to a point or a direction
    Transform {
        /// Matrix JSON file (must be 4x4)
        file: PathBuf,
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Target {
    /// Point `x,y,z`: translated and divided by the homogeneous weight
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    point: Option<Vec<f64>>,

    /// Direction `x,y,z`: only the upper-left 3x3 block applies
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    dir: Option<Vec<f64>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Closed form for 2x2/3x3, Gauss-Jordan for 4x4, LU otherwise
    Auto,
    /// Adjugate over determinant (2x2, 3x3)
    Closed,
    /// Scaled-pivot Gauss-Jordan (4x4)
    Gauss,
    /// LU decomposition, symmetric matrices only (any size)
    Lu,
}

#[derive(Debug, Deserialize)]
struct MatrixFile {
    rows: Vec<Vec<f64>>,
}

/// Calls `$f::<N>(..)` for the runtime size `$n`.
macro_rules! by_size {
    ($n:expr, $f:ident($($arg:expr),* $(,)?)) => {
        match $n {
            2 => $f::<2>($($arg),*),
            3 => $f::<3>($($arg),*),
            4 => $f::<4>($($arg),*),
            5 => $f::<5>($($arg),*),
            6 => $f::<6>($($arg),*),
            n => bail!("unsupported matrix size {n}x{n}"),
        }
    };
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let config = load_config(cli.config.as_deref(), cli.strict)?;
    debug!(?config, "numeric config");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli.cmd, &config, &mut out)?;
    out.flush()?;
    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!("installing tracing subscriber: {err}"))
}

fn load_config(path: Option<&Path>, strict: bool) -> Result<NumericConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            NumericConfig::from_json(&text)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => NumericConfig::default(),
    };
    if strict {
        config.singular_policy = SingularPolicy::Strict;
    }
    Ok(config)
}

fn load_rows(path: &Path) -> Result<Vec<Vec<f64>>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: MatrixFile =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let n = file.rows.len();
    ensure!(
        (2..=6).contains(&n),
        "matrix must have between 2 and 6 rows, got {n}"
    );
    for (i, row) in file.rows.iter().enumerate() {
        ensure!(row.len() == n, "row {i} has {} values, expected {n}", row.len());
    }
    Ok(file.rows)
}

fn fixed<const N: usize>(rows: &[Vec<f64>]) -> Result<[[f64; N]; N]> {
    ensure!(rows.len() == N, "expected a {N}x{N} matrix, got {} rows", rows.len());
    let mut out = [[0.0; N]; N];
    for (dst, src) in out.iter_mut().zip(rows) {
        *dst = <[f64; N]>::try_from(src.as_slice())
            .map_err(|_| anyhow!("expected rows of {N} values, got {}", src.len()))?;
    }
    Ok(out)
}

fn run(cmd: &Command, config: &NumericConfig, out: &mut dyn Write) -> Result<()> {
    match cmd {
        Command::Show { file } => show(out, &load_rows(file)?, config),
        Command::Invert { file, method } => invert(out, &load_rows(file)?, *method, config),
        Command::Solve { file, rhs } => {
            let rows = load_rows(file)?;
            by_size!(rows.len(), solve(out, &rows, rhs, config))
        }
        Command::Transform { file, target } => transform(out, &load_rows(file)?, target),
    }
}

fn show(out: &mut dyn Write, rows: &[Vec<f64>], config: &NumericConfig) -> Result<()> {
    match rows.len() {
        2 => {
            let m = Mat2::from_rows(fixed(rows)?);
            report(out, &m, m.determinant(), config)
        }
        3 => {
            let m = Mat3::from_rows(fixed(rows)?);
            report(out, &m, m.determinant(), config)
        }
        n => by_size!(n, show_lu(out, rows, config)),
    }
}

fn show_lu<const N: usize>(
    out: &mut dyn Write,
    rows: &[Vec<f64>],
    config: &NumericConfig,
) -> Result<()> {
    let m = MatN::<N>::from_rows(fixed(rows)?);
    // refused factors (zero row, or a zero pivot under --strict) mean a zero determinant
    let det = LuFactors::with_config(&m, config).map_or(0.0, |lu| lu.determinant());
    report(out, &m, det, config)
}

fn report<const N: usize>(
    out: &mut dyn Write,
    m: &MatN<N>,
    det: f64,
    config: &NumericConfig,
) -> Result<()> {
    write!(out, "{m}")?;
    writeln!(out, "determinant: {det}")?;
    writeln!(out, "symmetric: {}", m.is_symmetric_within(config.symmetry_epsilon))?;
    writeln!(out, "identity: {}", m.equivalent_with(&MatN::identity(), config))?;
    Ok(())
}

fn invert(
    out: &mut dyn Write,
    rows: &[Vec<f64>],
    method: Method,
    config: &NumericConfig,
) -> Result<()> {
    let n = rows.len();
    let method = match (method, n) {
        (Method::Auto, 2 | 3) => Method::Closed,
        (Method::Auto, 4) => Method::Gauss,
        (Method::Auto, _) => Method::Lu,
        (explicit, _) => explicit,
    };
    debug!(?method, n, "invert");
    match (method, n) {
        (Method::Closed, 2) => {
            let inv = Mat2::from_rows(fixed(rows)?).inverse_with(config)?;
            write!(out, "{inv}")?;
        }
        (Method::Closed, 3) => {
            let inv = Mat3::from_rows(fixed(rows)?).inverse_with(config)?;
            write!(out, "{inv}")?;
        }
        (Method::Gauss, 4) => {
            let inv = Mat4::from_rows(fixed(rows)?).inverse_with(config)?;
            write!(out, "{inv}")?;
        }
        (Method::Lu, n) => by_size!(n, invert_lu(out, rows, config))?,
        (method, n) => bail!("--method {method:?} does not apply to a {n}x{n} matrix"),
    }
    Ok(())
}

fn invert_lu<const N: usize>(
    out: &mut dyn Write,
    rows: &[Vec<f64>],
    config: &NumericConfig,
) -> Result<()> {
    let mut m = MatN::<N>::from_rows(fixed(rows)?);
    m.invert_with(config)?;
    write!(out, "{m}")?;
    Ok(())
}

fn solve<const N: usize>(
    out: &mut dyn Write,
    rows: &[Vec<f64>],
    rhs: &[f64],
    config: &NumericConfig,
) -> Result<()> {
    let a = MatN::<N>::from_rows(fixed(rows)?);
    let b = <[f64; N]>::try_from(rhs)
        .map_err(|_| anyhow!("--rhs needs {N} values, got {}", rhs.len()))?;
    let lu = LuFactors::with_config(&a, config)?;
    writeln!(out, "x = {}", bracketed(&lu.solve(b)))?;
    Ok(())
}

fn transform(out: &mut dyn Write, rows: &[Vec<f64>], target: &Target) -> Result<()> {
    let m = Mat4::from_rows(fixed(rows)?);
    if let Some(point) = &target.point {
        let p = vec3(point)?;
        // Zero weight has no printable fallback, so it is an error either way.
        let q = m.try_mult_matrix_point(p)?;
        writeln!(out, "point = {}", bracketed(&q))?;
    } else if let Some(dir) = &target.dir {
        let d = m.mult_matrix_dir(vec3(dir)?);
        writeln!(out, "dir = {}", bracketed(&d))?;
    }
    Ok(())
}

fn vec3(values: &[f64]) -> Result<[f64; 3]> {
    <[f64; 3]>::try_from(values).map_err(|_| anyhow!("expected x,y,z, got {} values", values.len()))
}

fn bracketed(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
