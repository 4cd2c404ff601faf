use std::time::Duration;

/// Upper bound on waiting for tiles, in case the widget's load events never
/// fire.
pub const DEFAULT_TILE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Tile lifecycle events forwarded from the map widget's tile layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileEvent {
    Loading,
    Loaded,
    Errored,
}

/// Tracks in-flight tile loads so the caller can hold off panning again
/// until the view has settled.
///
/// Pure state machine: the host feeds it [`TileEvent`]s and polls
/// [`settled`](TileSettle::settled) with the elapsed wait time. Settling
/// happens when no tiles are loading or when the bounded timeout expires,
/// whichever comes first; an errored tile counts as finished.
#[derive(Clone, Copy, Debug)]
pub struct TileSettle {
    loading: u32,
    timeout: Duration,
}

impl TileSettle {
    pub fn new(timeout: Duration) -> Self {
        Self { loading: 0, timeout }
    }

    pub fn on_event(&mut self, event: TileEvent) {
        match event {
            TileEvent::Loading => self.loading += 1,
            TileEvent::Loaded | TileEvent::Errored => {
                self.loading = self.loading.saturating_sub(1);
            }
        }
    }

    pub fn in_flight(&self) -> u32 {
        self.loading
    }

    pub fn settled(&self, elapsed: Duration) -> bool {
        self.loading == 0 || elapsed >= self.timeout
    }
}

impl Default for TileSettle {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_TIMEOUT)
    }
}
