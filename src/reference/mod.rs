//! Static reference material shipped with the dashboard: the city cluster
//! map, the trend chart naming convention and the example datasets.

mod map;
mod template;
mod trend;

pub use map::{default_cities, ReferenceCity, ReferenceGroup, ReferenceMap};
pub use template::{default_templates, find_template, Template};
pub use trend::{
    canonical_commodity, trend_image, Granularity, TrendImage, TrendView, COMMODITIES,
};
