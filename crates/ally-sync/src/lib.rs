//! Ally Sync Protocol
//!
//! The thin glue between the two isolated runtime contexts: typed
//! protocol messages, the backend [`Dispatcher`] with its explicit
//! [`SessionState`], timed notifications, and persisted preferences.
//!
//! Messages are fire-and-forget `{type, ...payload}` values with no
//! request/response correlation; unknown types are logged and ignored
//! on both sides.

mod dispatcher;
mod logging;
mod messages;
mod notify;
mod prefs;
mod session;

pub use dispatcher::{Dispatcher, MessageSink};
pub use logging::init_logging;
pub use messages::{BackendMessage, StepPatchPayload, UiMessage};
pub use notify::{Notification, DEFAULT_TIMEOUT_MS};
pub use prefs::{
    load_preferences, save_preferences, JsonFileStore, MemoryStore, PreferenceStore, PrefsError,
    PREFS_KEY,
};
pub use session::SessionState;
