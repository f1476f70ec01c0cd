//! `pangan trend`: resolve a pre-rendered price trend chart.

use super::Context;
use crate::error::{CliError, Result};
use crate::output;
use pangan::reference::{canonical_commodity, trend_image, Granularity, TrendView};

pub(crate) fn run(
    view: TrendView,
    granularity: Granularity,
    commodity: &str,
    ctx: &Context,
) -> Result<()> {
    let trend = &ctx.config.trend;
    canonical_commodity(&trend.commodities, commodity).map_err(|_| CliError::Unknown {
        kind: "commodity",
        name: commodity.to_string(),
    })?;

    let image = trend_image(
        &trend.image_dir,
        trend.n_clusters,
        &trend.commodities,
        view,
        granularity,
        commodity,
    )?;
    let exists = image.path.is_file();

    if ctx.json {
        return output::json(&serde_json::json!({
            "title": image.title,
            "path": image.path.display().to_string(),
            "exists": exists,
        }));
    }

    output::section(&image.title);
    output::kv("Image", image.path.display());
    if !exists {
        output::info("image file not found in the configured image directory");
    }
    Ok(())
}
