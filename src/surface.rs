use std::time::Duration;

use crate::{
    config::MarkerStyles,
    model::{LocationRecord, TimelineEntry},
    sequencer::{PlaybackObserver, PlaybackState},
};

/// Zoom level used when panning to a revealed entry.
pub const REVEAL_ZOOM: u8 = 6;

/// How long a place label stays up before the surface removes it.
pub const LABEL_DWELL: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<&LocationRecord> for LatLng {
    fn from(rec: &LocationRecord) -> Self {
        Self::new(rec.latitude, rec.longitude)
    }
}

/// A marker to pin on the map: position, category icon, popup HTML.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerRequest {
    pub position: LatLng,
    pub icon_url: String,
    pub icon_size: [u32; 2],
    pub popup_html: String,
}

/// A transient place label floating above a marker.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRequest {
    pub position: LatLng,
    pub html: String,
    /// Pixel size and anchor offset of the label box, anchor above the
    /// marker.
    pub size: [u32; 2],
    pub anchor: [i32; 2],
    /// The surface removes the label after this long; removal failures
    /// (label already gone) are swallowed surface-side.
    pub dwell: Duration,
}

/// The consumed interface of the external map widget. Implementations own
/// all rendering, layer bookkeeping and failure swallowing; this crate
/// never sees their errors.
pub trait MapSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn place_marker(&mut self, marker: MarkerRequest);
    fn place_label(&mut self, label: LabelRequest);
    fn clear_markers(&mut self);
}

/// Popup body shown when a placed marker is clicked.
pub fn popup_html(location: &LocationRecord) -> String {
    format!("<b>{}</b><br>Date first visited {}", location.city, location.date)
}

/// Floating label markup matching the host page's `.place-name-popup`
/// styling.
pub fn label_html(location: &LocationRecord) -> String {
    format!(
        "<div class=\"place-name-popup\">\
         <div class=\"place-city\">{}</div>\
         <div class=\"place-date\">{}</div>\
         </div>",
        location.city, location.date
    )
}

/// Translates playback events into map surface calls.
///
/// Presentation policy: an instant pan to the entry, the category-styled
/// marker with its popup, then a transient label held for a fixed dwell.
/// State changes are a UI concern and pass through untouched.
pub struct MarkerPresenter<S: MapSurface> {
    surface: S,
    styles: MarkerStyles,
    zoom: u8,
}

impl<S: MapSurface> MarkerPresenter<S> {
    pub fn new(surface: S, styles: MarkerStyles) -> Self {
        Self { surface, styles, zoom: REVEAL_ZOOM }
    }

    pub fn with_zoom(surface: S, styles: MarkerStyles, zoom: u8) -> Self {
        Self { surface, styles, zoom }
    }

    /// Asks the surface to drop every placed marker, e.g. after a sequencer
    /// reset.
    pub fn clear(&mut self) {
        self.surface.clear_markers();
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: MapSurface> PlaybackObserver for MarkerPresenter<S> {
    fn marker_reached(&mut self, entry: &TimelineEntry) {
        let position = LatLng::from(&entry.location);
        let style = self.styles.style(entry.category);

        self.surface.set_view(position, self.zoom);
        self.surface.place_marker(MarkerRequest {
            position,
            icon_url: style.icon_url.clone(),
            icon_size: style.icon_size,
            popup_html: popup_html(&entry.location),
        });
        self.surface.place_label(LabelRequest {
            position,
            html: label_html(&entry.location),
            size: [200, 50],
            anchor: [100, 65],
            dwell: LABEL_DWELL,
        });
    }

    fn state_changed(&mut self, _state: PlaybackState) {}
}
