//! Silhouette chart rendering.
//!
//! One horizontal band per cluster, values sorted ascending from the bottom
//! of the band, a 10-unit gap between bands (the first band starts at 10),
//! the cluster number left of the zero line and a red dashed line at the
//! mean coefficient.

use crate::metrics::SilhouetteAnalysis;

/// Document width in pixels.
pub const SVG_WIDTH: f64 = 640.0;
/// Document height in pixels.
pub const SVG_HEIGHT: f64 = 480.0;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 60.0;
const BAND_GAP: f64 = 10.0;
const X_TICKS: [(f64, &str); 7] = [
    (-0.1, "-0.1"),
    (0.0, "0"),
    (0.2, "0.2"),
    (0.4, "0.4"),
    (0.6, "0.6"),
    (0.8, "0.8"),
    (1.0, "1"),
];

// nipy_spectral control points at 0.00, 0.05, ..., 1.00.
const SPECTRAL: [(f64, f64, f64); 21] = [
    (0.0, 0.0, 0.0),
    (0.4667, 0.0, 0.5333),
    (0.5333, 0.0, 0.6),
    (0.0, 0.0, 0.6667),
    (0.0, 0.0, 0.8667),
    (0.0, 0.4667, 0.8667),
    (0.0, 0.6, 0.8667),
    (0.0, 0.6667, 0.6667),
    (0.0, 0.6667, 0.5333),
    (0.0, 0.6, 0.0),
    (0.0, 0.7333, 0.0),
    (0.0, 0.8667, 0.0),
    (0.0, 1.0, 0.0),
    (0.7333, 1.0, 0.0),
    (0.9333, 0.9333, 0.0),
    (1.0, 0.8, 0.0),
    (1.0, 0.6, 0.0),
    (1.0, 0.0, 0.0),
    (0.8667, 0.0, 0.0),
    (0.8, 0.0, 0.0),
    (0.8, 0.8, 0.8),
];

/// RGB colour of `cluster` out of `n_clusters`, sampled from a spectral
/// ramp at `cluster / n_clusters`.
///
/// ```
/// use pangan::report::cluster_color;
///
/// assert_eq!(cluster_color(0, 3), (0, 0, 0));
/// assert_ne!(cluster_color(1, 3), cluster_color(2, 3));
/// ```
#[must_use]
pub fn cluster_color(cluster: usize, n_clusters: usize) -> (u8, u8, u8) {
    let t = if n_clusters == 0 {
        0.0
    } else {
        (cluster as f64 / n_clusters as f64).clamp(0.0, 1.0)
    };
    let scaled = t * (SPECTRAL.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(SPECTRAL.len() - 1);
    let hi = (lo + 1).min(SPECTRAL.len() - 1);
    let frac = scaled - lo as f64;

    let lerp = |a: f64, b: f64| ((a + (b - a) * frac) * 255.0).round().clamp(0.0, 255.0) as u8;
    let (r0, g0, b0) = SPECTRAL[lo];
    let (r1, g1, b1) = SPECTRAL[hi];
    (lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

struct Axes {
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Axes {
    fn plot_width() -> f64 {
        SVG_WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        SVG_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn px(&self, x: f64) -> f64 {
        MARGIN_LEFT + (x - self.x_min) / (self.x_max - self.x_min) * Self::plot_width()
    }

    fn py(&self, y: f64) -> f64 {
        MARGIN_TOP + (self.y_max - y) / self.y_max * Self::plot_height()
    }
}

/// Renders the silhouette chart of one partition as a standalone SVG
/// document.
#[must_use]
pub fn silhouette_svg(analysis: &SilhouetteAnalysis, n_clusters: usize) -> String {
    let lowest = analysis
        .per_row()
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);

    let total_rows: usize = analysis.per_cluster().iter().map(|c| c.values.len()).sum();
    let axes = Axes {
        x_min: lowest.min(-0.1),
        x_max: 1.0,
        y_max: BAND_GAP * (analysis.per_cluster().len() + 1) as f64 + total_rows as f64,
    };

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SVG_WIDTH}\" height=\"{SVG_HEIGHT}\" viewBox=\"0 0 {SVG_WIDTH} {SVG_HEIGHT}\">\n"
    ));
    svg.push_str("  <style>\n");
    svg.push_str("    .label { font-family: sans-serif; font-size: 12px; }\n");
    svg.push_str("    .title { font-family: sans-serif; font-size: 14px; }\n");
    svg.push_str("  </style>\n");
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    let mut y_lower = BAND_GAP;
    let row_height = Axes::plot_height() / axes.y_max;
    for group in analysis.per_cluster() {
        let (r, g, b) = cluster_color(group.cluster, n_clusters);
        svg.push_str(&format!(
            "  <g class=\"cluster\" data-cluster=\"{}\" fill=\"#{r:02x}{g:02x}{b:02x}\" fill-opacity=\"0.7\">\n",
            group.cluster
        ));
        for (t, &value) in group.values.iter().enumerate() {
            let y = y_lower + t as f64;
            let x0 = axes.px(value.min(0.0));
            let x1 = axes.px(value.max(0.0));
            svg.push_str(&format!(
                "    <rect x=\"{x0:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{row_height:.2}\"/>\n",
                axes.py(y + 1.0),
                x1 - x0
            ));
        }
        svg.push_str("  </g>\n");

        let size = group.values.len() as f64;
        svg.push_str(&format!(
            "  <text x=\"{:.2}\" y=\"{:.2}\" class=\"label\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            axes.px(-0.05),
            axes.py(y_lower + 0.5 * size),
            group.cluster
        ));

        y_lower += size + BAND_GAP;
    }

    let bottom = axes.py(0.0);
    let top = axes.py(axes.y_max);
    svg.push_str(&format!(
        "  <rect x=\"{MARGIN_LEFT}\" y=\"{top:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"#333333\"/>\n",
        Axes::plot_width(),
        bottom - top
    ));

    for (value, label) in X_TICKS {
        let x = axes.px(value);
        svg.push_str(&format!(
            "  <line x1=\"{x:.2}\" y1=\"{bottom:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"#333333\"/>\n",
            bottom + 5.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{x:.2}\" y=\"{:.2}\" class=\"label\" text-anchor=\"middle\">{label}</text>\n",
            bottom + 20.0
        ));
    }

    let mean_x = axes.px(analysis.mean());
    svg.push_str(&format!(
        "  <line class=\"mean\" x1=\"{mean_x:.2}\" y1=\"{top:.2}\" x2=\"{mean_x:.2}\" y2=\"{bottom:.2}\" stroke=\"red\" stroke-dasharray=\"6,4\"/>\n"
    ));

    svg.push_str(&format!(
        "  <text x=\"{:.2}\" y=\"{:.2}\" class=\"title\" text-anchor=\"middle\">Silhouette Coefficient</text>\n",
        MARGIN_LEFT + Axes::plot_width() / 2.0,
        SVG_HEIGHT - 15.0
    ));
    svg.push_str(&format!(
        "  <text x=\"20\" y=\"{:.2}\" class=\"title\" text-anchor=\"middle\" transform=\"rotate(-90 20 {:.2})\">Cluster Label</text>\n",
        MARGIN_TOP + Axes::plot_height() / 2.0,
        MARGIN_TOP + Axes::plot_height() / 2.0
    ));

    svg.push_str("</svg>\n");
    svg
}
