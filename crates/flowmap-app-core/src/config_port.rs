// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port shared across flowmap front ends.

use tracing::warn;

use crate::config::{ConfigService, ConfigStore};
use crate::prefs::{FlowmapPrefs, PREFS_KEY};

/// Config-facing port for loading/saving preferences.
pub trait ConfigPort {
    /// Load preferences (None if missing or unreadable).
    fn load_prefs(&self) -> Option<FlowmapPrefs>;
    /// Persist preferences (best-effort; failures are logged).
    fn save_prefs(&self, prefs: &FlowmapPrefs);

    /// Saved preferences, or defaults when none are usable.
    fn prefs_or_default(&self) -> FlowmapPrefs {
        self.load_prefs().unwrap_or_default()
    }
}

impl<S: ConfigStore> ConfigPort for ConfigService<S> {
    fn load_prefs(&self) -> Option<FlowmapPrefs> {
        match self.load(PREFS_KEY) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable prefs");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &FlowmapPrefs) {
        if let Err(e) = self.save(PREFS_KEY, prefs) {
            warn!(error = %e, "failed to save prefs");
        }
    }
}
