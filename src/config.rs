use crate::model::Category;

/// Initial view and zoom limits for the hosting map widget.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapConfig {
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub bounds: MapBounds,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapBounds {
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [37.8, -122.27],
            zoom: 8,
            min_zoom: 1,
            max_zoom: 16,
            bounds: MapBounds {
                south_west: [-89.98155760646617, -180.0],
                north_east: [89.99346179538875, 180.0],
            },
        }
    }
}

/// Background imagery layer passed through to the map widget.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TileLayerConfig {
    pub url_template: String,
    pub attribution: String,
    pub ext: String,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url_template: "https://tiles.stadiamaps.com/tiles/stamen_watercolor/{z}/{x}/{y}.{ext}"
                .into(),
            attribution: "&copy; <a href=\"https://www.stadiamaps.com/\" target=\"_blank\">Stadia Maps</a> &copy; <a href=\"https://www.stamen.com/\" target=\"_blank\">Stamen Design</a> &copy; <a href=\"https://openmaptiles.org/\" target=\"_blank\">OpenMapTiles</a> &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .into(),
            ext: "jpg".into(),
        }
    }
}

/// Marker icon for one visit category.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarkerStyle {
    pub icon_url: String,
    pub icon_size: [u32; 2],
}

/// Icon set keyed by category, defaulting to the bundled 25x25 icons.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarkerStyles {
    pub city: MarkerStyle,
    pub ski: MarkerStyle,
    pub hike: MarkerStyle,
    pub lived: MarkerStyle,
}

impl MarkerStyles {
    pub fn style(&self, category: Category) -> &MarkerStyle {
        match category {
            Category::City => &self.city,
            Category::Ski => &self.ski,
            Category::Hike => &self.hike,
            Category::Lived => &self.lived,
        }
    }
}

impl Default for MarkerStyles {
    fn default() -> Self {
        let style = |name: &str| MarkerStyle {
            icon_url: format!("icons/{name}.png"),
            icon_size: [25, 25],
        };
        Self {
            city: style("city"),
            ski: style("ski"),
            hike: style("hike"),
            lived: style("lived"),
        }
    }
}
