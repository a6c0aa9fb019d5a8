//! Log-and-degrade access to a configuration shared across a process.
//!
//! [`SharedConfig`] keeps the behaviour of a load-once global store: load
//! failures are logged rather than returned, and lookups yield `""` when
//! nothing usable is loaded. Unlike a global, the handle is owned and
//! passed around by the caller, and each reload swaps in a complete
//! snapshot so readers never observe a half-parsed file.

use std::io::Read;
use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::ConfigResult;
use crate::loader::{load_from_file, parse_from_stream};
use crate::store::Config;

/// Cloneable handle to the most recently loaded [`Config`].
///
/// Holds either a parsed snapshot or the failed state. A new handle starts
/// in the failed state; clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct SharedConfig {
    slot: Arc<RwLock<Option<Arc<Config>>>>,
}

impl SharedConfig {
    /// Create a handle in the failed (nothing loaded) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already parsed configuration.
    pub fn from_config(config: Config) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(Arc::new(config)))),
        }
    }

    /// Replace the contents with the parse of the file at `path`.
    ///
    /// On any failure the previous contents are discarded and the handle
    /// enters the failed state. Returns `true` on success.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> bool {
        self.replace(load_from_file(path))
    }

    /// Replace the contents with the parse of `reader`.
    ///
    /// Same failure policy as [`Self::load_from_file`].
    pub fn parse_from_stream<R: Read>(&self, reader: R) -> bool {
        self.replace(parse_from_stream(reader))
    }

    /// Value of `section.key`, or `""` if it is absent or the last load
    /// failed.
    pub fn get(&self, section: &str, key: &str) -> String {
        self.snapshot()
            .and_then(|config| config.get(section, key).map(str::to_owned))
            .unwrap_or_default()
    }

    /// The current snapshot, or `None` in the failed state.
    pub fn snapshot(&self) -> Option<Arc<Config>> {
        match self.slot.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                warn!("config lock poisoned: {e}");
                None
            }
        }
    }

    /// Returns `true` if the last load succeeded.
    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    fn replace(&self, result: ConfigResult<Config>) -> bool {
        let next = match result {
            Ok(config) => Some(Arc::new(config)),
            Err(e) => {
                debug!(error = %e, "configuration cleared after failed load");
                None
            }
        };
        let loaded = next.is_some();

        match self.slot.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }

        debug!(loaded, "configuration replaced");
        loaded
    }
}
