//! CLI front end for the census library: `census`, `pairings`, `canon`, and
//! `dot` subcommands.

use clap::{Parser, Subcommand};
use simplicial_census::{Boundary, CensusDriver, FacetPairing, Orientability};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "census")]
#[command(about = "Isomorphism-free enumeration of simplicial triangulations")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full census: enumerate pairings, search gluings, filter, and
    /// report every accepted triangulation.
    Census {
        /// Simplex dimension: 2 (triangles), 3 (tetrahedra), or 4 (pentachora).
        #[arg(short = 'd', long, default_value = "3")]
        dim: usize,

        /// Number of simplices.
        #[arg(short = 'n', long)]
        size: usize,

        /// "closed", "any", "required", or an exact integer boundary-facet count.
        #[arg(short = 'b', long, default_value = "closed")]
        boundary: String,

        /// "both", "orientable", or "nonorientable".
        #[arg(short = 'o', long, default_value = "both")]
        orientability: String,

        /// Only print the final count, not each accepted triangulation.
        #[arg(short = 'q', long)]
        quiet: bool,
    },
    /// Enumerate canonical facet pairings only (no gluing search).
    Pairings {
        #[arg(short = 'd', long, default_value = "3")]
        dim: usize,
        #[arg(short = 'n', long)]
        size: usize,
        #[arg(short = 'b', long, default_value = "closed")]
        boundary: String,
    },
    /// Check whether a facet pairing's text representation is canonical.
    Canon {
        #[arg(short = 'd', long, default_value = "3")]
        dim: usize,
        /// The pairing's text representation, e.g. "1 0 1 1 1 2 0 0 0 1 0 2".
        #[arg(short = 'p', long)]
        pairing: String,
    },
    /// Render a facet pairing's text representation as Graphviz dot.
    Dot {
        #[arg(short = 'd', long, default_value = "3")]
        dim: usize,
        #[arg(short = 'p', long)]
        pairing: String,
        /// Label each node with its simplex index.
        #[arg(long)]
        labels: bool,
    },
}

fn parse_boundary(s: &str) -> Result<Boundary, String> {
    match s {
        "closed" => Ok(Boundary::Closed),
        "any" => Ok(Boundary::Any),
        "required" => Ok(Boundary::Required),
        other => other
            .parse::<usize>()
            .map(Boundary::Exact)
            .map_err(|_| format!("invalid --boundary value: {other}")),
    }
}

fn parse_orientability(s: &str) -> Result<Orientability, String> {
    match s {
        "both" => Ok(Orientability::both()),
        "orientable" => Ok(Orientability::orientable_only()),
        "nonorientable" => Ok(Orientability::non_orientable_only()),
        other => Err(format!("invalid --orientability value: {other}")),
    }
}

fn handle_census_command(
    dim: usize,
    size: usize,
    boundary: String,
    orientability: String,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let boundary = parse_boundary(&boundary)?;
    let orientability = parse_orientability(&orientability)?;

    info!(dim, size, "starting census");
    let start = Instant::now();

    macro_rules! run {
        ($k:literal) => {
            CensusDriver::<$k>::form_census(
                size,
                orientability,
                boundary,
                &simplicial_census::NullProgress,
                |_tri| true,
                |k, tri| {
                    if !quiet {
                        println!("Item {k}: {}", tri.is_valid());
                        debug!(item = k, boundary = tri.boundary_facet_count(), "accepted");
                    }
                },
            )
        };
    }

    let count = match dim {
        2 => run!(3),
        3 => run!(4),
        4 => run!(5),
        other => return Err(format!("unsupported dimension {other}; expected 2, 3, or 4").into()),
    };

    let elapsed = start.elapsed();
    println!("\nTotal triangulations found: {count}");
    println!("Time taken: {:.3} seconds", elapsed.as_secs_f64());
    Ok(())
}

fn handle_pairings_command(dim: usize, size: usize, boundary: String) -> Result<(), Box<dyn std::error::Error>> {
    let boundary = parse_boundary(&boundary)?;
    let start = Instant::now();

    macro_rules! run {
        ($k:literal) => {{
            let enumerator = simplicial_census::PairingEnumerator::<$k>::new(size, boundary);
            let mut count = 0usize;
            enumerator.enumerate(&simplicial_census::NullProgress, |pairing, _autos| {
                if let Some(p) = pairing {
                    count += 1;
                    println!("{}", p.to_text_rep());
                }
            });
            count
        }};
    }

    let count = match dim {
        2 => run!(3),
        3 => run!(4),
        4 => run!(5),
        other => return Err(format!("unsupported dimension {other}; expected 2, 3, or 4").into()),
    };

    println!("\nTotal canonical pairings: {count}");
    println!("Time taken: {:.3} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

fn handle_canon_command(dim: usize, pairing: String) -> Result<(), Box<dyn std::error::Error>> {
    macro_rules! run {
        ($k:literal) => {{
            let p = FacetPairing::<$k>::from_text_rep(&pairing)
                .ok_or("malformed facet pairing text representation")?;
            println!("Canonical: {}", p.is_canonical());
            let alpha = p.make_canonical();
            let canon = p.apply_isomorphism(&alpha);
            println!("Canonical form: {}", canon.to_text_rep());
        }};
    }

    match dim {
        2 => run!(3),
        3 => run!(4),
        4 => run!(5),
        other => return Err(format!("unsupported dimension {other}; expected 2, 3, or 4").into()),
    }
    Ok(())
}

fn handle_dot_command(dim: usize, pairing: String, labels: bool) -> Result<(), Box<dyn std::error::Error>> {
    macro_rules! run {
        ($k:literal) => {{
            let p = FacetPairing::<$k>::from_text_rep(&pairing)
                .ok_or("malformed facet pairing text representation")?;
            print!("{}", p.to_dot("g", false, labels));
        }};
    }

    match dim {
        2 => run!(3),
        3 => run!(4),
        4 => run!(5),
        other => return Err(format!("unsupported dimension {other}; expected 2, 3, or 4").into()),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Census { dim, size, boundary, orientability, quiet } => {
            handle_census_command(dim, size, boundary, orientability, quiet)
        }
        Commands::Pairings { dim, size, boundary } => handle_pairings_command(dim, size, boundary),
        Commands::Canon { dim, pairing } => handle_canon_command(dim, pairing),
        Commands::Dot { dim, pairing, labels } => handle_dot_command(dim, pairing, labels),
    }
}
