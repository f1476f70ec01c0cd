//! Pre-rendered price trend charts, found by naming convention.
//!
//! A chart is either one cluster's trend (`C{n}{g}_{commodity}.png`) or the
//! comparison across clusters (`P{g}_{commodity}.png`), where `g` is `t`
//! for yearly and `b` for monthly charts and the commodity is lowercased.

use crate::error::{PanganError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Commodities with trend charts, in menu order.
pub const COMMODITIES: [&str; 11] = [
    "Beras",
    "Telur Ayam",
    "Daging Ayam",
    "Daging Sapi",
    "Bawang Merah",
    "Bawang Putih",
    "Cabai Merah Keriting",
    "Cabai Rawit Hijau",
    "Cabai Rawit Merah",
    "Minyak Goreng",
    "Gula Pasir",
];

/// Time resolution of a trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Yearly ("Tahunan").
    Tahunan,
    /// Monthly ("Bulanan").
    Bulanan,
}

impl Granularity {
    /// File-name letter: the lowercased first letter of the label.
    #[must_use]
    pub fn suffix(self) -> char {
        match self {
            Granularity::Tahunan => 't',
            Granularity::Bulanan => 'b',
        }
    }

    /// Menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Granularity::Tahunan => "Tahunan",
            Granularity::Bulanan => "Bulanan",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = PanganError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tahunan" | "yearly" => Ok(Granularity::Tahunan),
            "bulanan" | "monthly" => Ok(Granularity::Bulanan),
            _ => Err(PanganError::invalid_parameter(
                "granularity",
                s,
                "tahunan or bulanan",
            )),
        }
    }
}

/// Which chart family to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendView {
    /// Trend of one reference cluster, numbered from 1.
    Cluster(usize),
    /// All reference clusters side by side.
    Comparison,
}

/// A resolved trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendImage {
    /// Chart heading.
    pub title: String,
    /// Image file, joined onto the image directory.
    pub path: PathBuf,
}

/// Finds the canonical spelling of a commodity, ignoring case and
/// surrounding whitespace.
///
/// # Errors
///
/// Returns `InvalidParameter` if the name is not in `commodities`.
pub fn canonical_commodity<'a>(commodities: &'a [String], name: &str) -> Result<&'a str> {
    let wanted = name.trim().to_lowercase();
    commodities
        .iter()
        .find(|c| c.to_lowercase() == wanted)
        .map(String::as_str)
        .ok_or_else(|| {
            PanganError::invalid_parameter("commodity", name, format!("one of {}", commodities.join(", ")))
        })
}

/// Resolves the chart for a view, granularity and commodity.
///
/// # Errors
///
/// Returns `InvalidParameter` if the cluster number is outside
/// `1..=n_clusters` or the commodity is unknown.
///
/// # Examples
///
/// ```
/// use pangan::reference::{trend_image, Granularity, TrendView, COMMODITIES};
///
/// let commodities: Vec<String> = COMMODITIES.iter().map(|c| c.to_string()).collect();
/// let image = trend_image("img", 3, &commodities, TrendView::Cluster(2), Granularity::Bulanan, "beras")
///     .expect("known commodity");
/// assert!(image.path.ends_with("C2b_beras.png"));
/// assert_eq!(image.title, "Pola Data Tren Bulanan Beras");
/// ```
pub fn trend_image(
    image_dir: impl AsRef<Path>,
    n_clusters: usize,
    commodities: &[String],
    view: TrendView,
    granularity: Granularity,
    commodity: &str,
) -> Result<TrendImage> {
    let commodity = canonical_commodity(commodities, commodity)?;
    let slug = commodity.to_lowercase();
    let suffix = granularity.suffix();

    let (file, title) = match view {
        TrendView::Cluster(n) => {
            if n == 0 || n > n_clusters {
                return Err(PanganError::invalid_parameter(
                    "cluster",
                    n,
                    format!("1..={n_clusters}"),
                ));
            }
            (
                format!("C{n}{suffix}_{slug}.png"),
                format!("Pola Data Tren {granularity} {commodity}"),
            )
        }
        TrendView::Comparison => (
            format!("P{suffix}_{slug}.png"),
            format!("Perbandingan Pola Data Tren {granularity} {commodity}"),
        ),
    };

    Ok(TrendImage {
        title,
        path: image_dir.as_ref().join(file),
    })
}
