//! pangan - food price clustering CLI
//!
//! Usage:
//!   pangan cluster harga.csv -k 3            # Cluster cities by price pattern
//!   pangan cluster harga.csv --svg sil.svg   # Also write the silhouette chart
//!   pangan normalize harga.csv -o norm.csv   # Min-Max scale a price table
//!   pangan dataset list                      # Show the bundled templates
//!   pangan dataset show biasa                # Print a bundled template
//!   pangan dataset export biasa -o raw.csv   # Save a template locally
//!   pangan map --geojson peta.json           # Reference city clusters
//!   pangan trend --cluster 1 -g bulanan --commodity Beras

use clap::{Parser, Subcommand};
use pangan::config::DashboardConfig;
use pangan::reference::{Granularity, TrendView};
use pangan::session::{ClusterRequest, DEFAULT_N_CLUSTERS};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::{cluster, dataset, map, normalize, trend, Context};

/// pangan - cluster regions by staple food prices
///
/// Groups cities by the shape of their commodity price profiles with
/// K-Means and scores the partition with silhouette analysis.
#[derive(Parser)]
#[command(name = "pangan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Dashboard config file (JSON)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run K-Means on a price table and report clusters and silhouettes
    Cluster {
        /// CSV or Excel price table: commodities as rows, cities as columns
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of clusters
        #[arg(short = 'k', long, default_value_t = DEFAULT_N_CLUSTERS)]
        clusters: usize,

        /// Random state for centroid seeding
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Skip silhouette analysis
        #[arg(long)]
        no_silhouette: bool,

        /// Cluster the rows as they are instead of the transposed table
        #[arg(long)]
        no_transpose: bool,

        /// Min-Max scale each feature before clustering
        #[arg(long)]
        normalize: bool,

        /// Lloyd iterations per run
        #[arg(long, default_value_t = 300)]
        max_iter: usize,

        /// Independent seedings; the lowest inertia wins
        #[arg(long, default_value_t = 10)]
        n_init: usize,

        /// Write the silhouette chart as SVG
        #[arg(long, value_name = "PATH", conflicts_with = "no_silhouette")]
        svg: Option<PathBuf>,
    },

    /// Min-Max scale a price table and write it as CSV
    Normalize {
        /// CSV or Excel price table
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output CSV
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        /// Scale the rows as they are instead of the transposed table
        #[arg(long)]
        no_transpose: bool,
    },

    /// Bundled example datasets
    Dataset {
        #[command(subcommand)]
        action: DatasetAction,
    },

    /// Reference map of the published city clusters
    Map {
        /// Write the map as a GeoJSON FeatureCollection
        #[arg(long, value_name = "PATH")]
        geojson: Option<PathBuf>,
    },

    /// Locate a pre-rendered price trend chart
    Trend {
        /// Reference cluster number, from 1
        #[arg(long, conflicts_with = "comparison", required_unless_present = "comparison")]
        cluster: Option<usize>,

        /// Compare all reference clusters
        #[arg(long)]
        comparison: bool,

        /// Chart resolution: tahunan or bulanan
        #[arg(short, long, value_parser = parse_granularity)]
        granularity: Granularity,

        /// Commodity name, case-insensitive
        #[arg(long)]
        commodity: String,
    },
}

#[derive(Subcommand)]
enum DatasetAction {
    /// List the bundled templates
    List,

    /// Print a template as a table
    Show {
        /// Template name (normalisasi or biasa)
        name: String,
    },

    /// Copy a template to a local file
    Export {
        /// Template name (normalisasi or biasa)
        name: String,

        /// Destination file
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,
    },
}

fn parse_granularity(s: &str) -> Result<Granularity, String> {
    s.parse().map_err(|e: pangan::PanganError| e.to_string())
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    let config = DashboardConfig::resolve(cli.config.as_deref())?;
    let ctx = Context {
        config,
        json: cli.json,
    };

    match cli.command {
        Commands::Cluster {
            file,
            clusters,
            seed,
            no_silhouette,
            no_transpose,
            normalize,
            max_iter,
            n_init,
            svg,
        } => {
            let request = ClusterRequest::new(clusters)
                .with_random_state(seed)
                .with_silhouette(!no_silhouette)
                .with_transpose(!no_transpose)
                .with_normalize(normalize)
                .with_max_iter(max_iter)
                .with_n_init(n_init);
            cluster::run(&cluster::ClusterArgs { file, request, svg }, &ctx)
        }

        Commands::Normalize {
            file,
            output,
            no_transpose,
        } => normalize::run(&file, &output, !no_transpose, &ctx),

        Commands::Dataset { action } => match action {
            DatasetAction::List => dataset::list(&ctx),
            DatasetAction::Show { name } => dataset::show(&name, &ctx),
            DatasetAction::Export { name, output } => dataset::export(&name, &output, &ctx),
        },

        Commands::Map { geojson } => map::run(geojson.as_deref(), &ctx),

        Commands::Trend {
            cluster,
            comparison: _,
            granularity,
            commodity,
        } => {
            let view = cluster.map_or(TrendView::Comparison, TrendView::Cluster);
            trend::run(view, granularity, &commodity, &ctx)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cluster_defaults() {
        let cli = Cli::try_parse_from(["pangan", "cluster", "harga.csv"]).expect("parses");
        match cli.command {
            Commands::Cluster {
                clusters,
                seed,
                no_silhouette,
                no_transpose,
                normalize,
                max_iter,
                n_init,
                svg,
                ..
            } => {
                assert_eq!(clusters, 3);
                assert_eq!(seed, 0);
                assert!(!no_silhouette);
                assert!(!no_transpose);
                assert!(!normalize);
                assert_eq!(max_iter, 300);
                assert_eq!(n_init, 10);
                assert!(svg.is_none());
            }
            _ => panic!("expected cluster"),
        }
    }

    #[test]
    fn test_svg_conflicts_with_no_silhouette() {
        let parsed = Cli::try_parse_from([
            "pangan",
            "cluster",
            "harga.csv",
            "--no-silhouette",
            "--svg",
            "out.svg",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_dataset_show_parses_name() {
        let cli = Cli::try_parse_from(["pangan", "dataset", "show", "biasa"]).expect("parses");
        match cli.command {
            Commands::Dataset {
                action: DatasetAction::Show { name },
            } => assert_eq!(name, "biasa"),
            _ => panic!("expected dataset show"),
        }
        assert!(Cli::try_parse_from(["pangan", "dataset", "show"]).is_err());
    }

    #[test]
    fn test_trend_requires_a_view() {
        let parsed = Cli::try_parse_from([
            "pangan",
            "trend",
            "--granularity",
            "bulanan",
            "--commodity",
            "Beras",
        ]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "pangan",
            "trend",
            "--comparison",
            "-g",
            "yearly",
            "--commodity",
            "Beras",
        ])
        .expect("parses");
        match cli.command {
            Commands::Trend {
                cluster,
                granularity,
                ..
            } => {
                assert!(cluster.is_none());
                assert_eq!(granularity, Granularity::Tahunan);
            }
            _ => panic!("expected trend"),
        }
    }

    #[test]
    fn test_bad_granularity_is_rejected() {
        let parsed = Cli::try_parse_from([
            "pangan",
            "trend",
            "--cluster",
            "1",
            "-g",
            "weekly",
            "--commodity",
            "Beras",
        ]);
        assert!(parsed.is_err());
    }
}
