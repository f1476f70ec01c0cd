//! Fixed city map with pre-assigned clusters.
//!
//! The listing is published reference data from an earlier study. It is
//! never recomputed from, or checked against, a live clustering run.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One city marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCity {
    /// City name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Pre-assigned cluster, numbered from 1.
    pub cluster: usize,
}

impl ReferenceCity {
    fn new(name: &str, latitude: f64, longitude: f64, cluster: usize) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
            cluster,
        }
    }

    /// Marker popup text.
    #[must_use]
    pub fn popup(&self) -> String {
        format!("{}<br>Cluster: {}", self.name, self.cluster)
    }
}

/// Map viewport plus the reference markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceMap {
    /// Map centre as `[latitude, longitude]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Marker colour of cluster `n`, at index `n - 1`.
    pub palette: Vec<String>,
    /// Every marker.
    pub cities: Vec<ReferenceCity>,
}

impl Default for ReferenceMap {
    fn default() -> Self {
        Self {
            center: [-7.6145, 110.7121],
            zoom: 7,
            width: 800,
            height: 600,
            palette: vec!["blue".to_string(), "orange".to_string(), "green".to_string()],
            cities: default_cities(),
        }
    }
}

/// The 23 reference cities of Java and their published clusters.
#[must_use]
pub fn default_cities() -> Vec<ReferenceCity> {
    vec![
        ReferenceCity::new("Bandung", -6.9147, 107.6098, 1),
        ReferenceCity::new("Banyumas", -7.5155, 109.2947, 1),
        ReferenceCity::new("Bekasi", -6.2348, 106.9945, 1),
        ReferenceCity::new("Blitar", -8.0984, 112.1684, 1),
        ReferenceCity::new("Bogor", -6.5944, 106.7892, 1),
        ReferenceCity::new("Cilacap", -7.7188, 109.0159, 1),
        ReferenceCity::new("Cirebon", -6.7053, 108.5554, 1),
        ReferenceCity::new("Depok", -6.4025, 106.7942, 1),
        ReferenceCity::new("Jember", -8.1724, 113.699, 1),
        ReferenceCity::new("Kediri", -7.8166, 112.0111, 1),
        ReferenceCity::new("Madiun", -7.6298, 111.5237, 1),
        ReferenceCity::new("Malang", -7.9666, 112.6326, 1),
        ReferenceCity::new("Solo", -7.5561, 110.8316, 1),
        ReferenceCity::new("Sukabumi", -6.9294, 106.9294, 1),
        ReferenceCity::new("Surabaya", -7.2575, 112.7521, 1),
        ReferenceCity::new("Surakarta", -7.571, 110.8258, 1),
        ReferenceCity::new("Jakarta Pusat", -6.2088, 106.8456, 2),
        ReferenceCity::new("Semarang", -7.0051, 110.4381, 2),
        ReferenceCity::new("Serang", -6.1091, 106.1504, 2),
        ReferenceCity::new("Tangerang", -6.178, 106.63, 2),
        ReferenceCity::new("Yogyakarta", -7.7956, 110.3695, 2),
        ReferenceCity::new("Tasikmalaya", -7.3276, 108.2208, 3),
        ReferenceCity::new("Tegal", -6.8694, 109.1402, 3),
    ]
}

/// Cities of one reference cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceGroup<'a> {
    /// Cluster number, from 1.
    pub cluster: usize,
    /// Marker colour.
    pub color: &'a str,
    /// Member cities in listing order.
    pub cities: Vec<&'a ReferenceCity>,
}

impl ReferenceMap {
    /// Marker colour for a cluster number, `gray` when the palette has none.
    #[must_use]
    pub fn color_of(&self, cluster: usize) -> &str {
        cluster
            .checked_sub(1)
            .and_then(|i| self.palette.get(i))
            .map_or("gray", String::as_str)
    }

    /// Looks up a city by name.
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&ReferenceCity> {
        self.cities.iter().find(|c| c.name == name)
    }

    /// Cities grouped by cluster, ascending.
    #[must_use]
    pub fn groups(&self) -> Vec<ReferenceGroup<'_>> {
        let mut numbers: Vec<usize> = self.cities.iter().map(|c| c.cluster).collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
            .into_iter()
            .map(|cluster| ReferenceGroup {
                cluster,
                color: self.color_of(cluster),
                cities: self.cities.iter().filter(|c| c.cluster == cluster).collect(),
            })
            .collect()
    }

    /// GeoJSON `FeatureCollection` with one point feature per city.
    ///
    /// Coordinates follow GeoJSON order: `[longitude, latitude]`.
    #[must_use]
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .cities
            .iter()
            .map(|city| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [city.longitude, city.latitude],
                    },
                    "properties": {
                        "name": city.name,
                        "cluster": city.cluster,
                        "color": self.color_of(city.cluster),
                        "popup": city.popup(),
                    },
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
            "properties": {
                "center": self.center,
                "zoom": self.zoom,
                "width": self.width,
                "height": self.height,
            },
        })
    }
}
