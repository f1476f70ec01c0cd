//! `pangan map`: the reference city map with published clusters.

use super::Context;
use crate::error::Result;
use crate::output;
use colored::Colorize;
use std::path::Path;

pub(crate) fn run(geojson: Option<&Path>, ctx: &Context) -> Result<()> {
    let map = &ctx.config.map;

    if let Some(path) = geojson {
        let text = serde_json::to_string_pretty(&map.to_geojson())?;
        std::fs::write(path, text)?;
    }

    if ctx.json {
        return output::json(&map.to_geojson());
    }

    output::section("Peta Cluster di Pulau Jawa");
    output::kv("Center", format!("{}, {}", map.center[0], map.center[1]));
    output::kv("Zoom", map.zoom);
    output::kv("Size", format!("{}x{}", map.width, map.height));

    for group in map.groups() {
        println!(
            "\n  {} ({}, {} cities)",
            format!("Cluster {}", group.cluster).bold(),
            group.color,
            group.cities.len()
        );
        for city in &group.cities {
            println!(
                "    {:<16} {:>9.4} {:>10.4}",
                city.name, city.latitude, city.longitude
            );
        }
    }

    if let Some(path) = geojson {
        output::success(&format!("GeoJSON written to: {}", path.display()));
    }
    Ok(())
}
