#![forbid(unsafe_code)]

//! Travel-history timeline building and map playback sequencing.
//!
//! Four categorized lists of visited places (cities, ski trips, hikes,
//! places lived) are merged into one date-sorted timeline, then played
//! back by a timer-driven sequencer that reveals one marker per tick and
//! reports progress. Map rendering itself belongs to an external widget;
//! only its consumed interface ([`surface::MapSurface`]) is modeled here.

pub mod config;
pub mod data;
pub mod date;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod sequencer;
pub mod surface;
pub mod tiles;
pub mod timeline;
pub mod years;

pub use config::{MapConfig, MarkerStyle, MarkerStyles, TileLayerConfig};
pub use date::DateValue;
pub use error::{WaylineError, WaylineResult};
pub use model::{CategorizedRecords, Category, LocationRecord, TimelineEntry};
pub use scheduler::{QueueScheduler, Scheduler, TimerToken};
pub use sequencer::{PlaybackObserver, PlaybackPhase, PlaybackState, Sequencer, DEFAULT_SPEED};
pub use surface::{LatLng, LabelRequest, MapSurface, MarkerPresenter, MarkerRequest};
pub use tiles::{TileEvent, TileSettle};
pub use years::{year_markers, YearMarker};
