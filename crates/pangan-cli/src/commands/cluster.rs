//! `pangan cluster`: run one K-Means experiment on an uploaded table.

use super::{validate_path, Context};
use crate::error::Result;
use crate::output;
use colored::Colorize;
use pangan::data::load_table;
use pangan::report::{cluster_color, ClusterReport};
use pangan::session::{run_experiment, ClusterRequest};
use std::path::{Path, PathBuf};

/// Half-width of a terminal silhouette bar, in cells.
const BAR_HALF: usize = 20;

pub(crate) struct ClusterArgs {
    pub(crate) file: PathBuf,
    pub(crate) request: ClusterRequest,
    pub(crate) svg: Option<PathBuf>,
}

pub(crate) fn run(args: &ClusterArgs, ctx: &Context) -> Result<()> {
    validate_path(&args.file)?;
    let frame = load_table(&args.file)?;
    tracing::debug!(
        file = %args.file.display(),
        rows = frame.n_rows(),
        cols = frame.n_cols(),
        "table loaded"
    );

    let report = run_experiment(&frame, &args.request, &ctx.config.limits)?;

    if let Some(path) = &args.svg {
        write_svg(&report, path)?;
    }

    if ctx.json {
        return output::json(&report);
    }

    print_report(&report);
    if let Some(path) = &args.svg {
        output::success(&format!("Silhouette chart written to: {}", path.display()));
    }
    Ok(())
}

fn write_svg(report: &ClusterReport, path: &Path) -> Result<()> {
    if let Some(svg) = report.silhouette_svg() {
        std::fs::write(path, svg)?;
    }
    Ok(())
}

fn print_report(report: &ClusterReport) {
    let k = report.n_clusters();

    output::section("Hasil Clustering");
    output::kv("Clusters", k);
    output::kv("Random state", report.random_state());
    output::kv("Entities", report.entities().len());
    output::kv("Normalized", report.normalized());
    output::kv("Inertia", format!("{:.6}", report.inertia()));
    output::kv("Iterations", report.n_iter());

    output::section("Cluster per entity");
    let rows: Vec<(String, String)> = report
        .entities()
        .iter()
        .map(|e| (e.entity.clone(), e.cluster.to_string()))
        .collect();
    output::table(("Entity", "Cluster"), &rows);

    output::section("Anggota cluster");
    let rows: Vec<(String, String)> = report
        .groups()
        .iter()
        .map(|g| (g.cluster.to_string(), g.joined()))
        .collect();
    output::table(("Cluster", "Kota"), &rows);

    if let Some(analysis) = report.silhouette() {
        output::section("Visualisasi Silhouette");
        for group in analysis.per_cluster() {
            let (r, g, b) = cluster_color(group.cluster, k);
            println!("  {}", format!("cluster {}", group.cluster).bold());
            for &value in &group.values {
                println!(
                    "  {:>7.3} {}",
                    value,
                    output::bar(value, BAR_HALF).truecolor(r, g, b)
                );
            }
        }
        println!();
        println!(
            "  Nilai Rata-Rata Silhouette dengan {k} Cluster : {}",
            format!("{:.6}", analysis.mean()).green().bold()
        );
    } else {
        output::info("Silhouette analysis skipped");
    }
}
