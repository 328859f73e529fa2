//! Snooze engine: HTTP access to the hack-or-snooze API and the background
//! runner that executes requests for the front-end.
mod api;
mod engine;
pub mod ops;
mod persist;
mod types;
mod wire;

pub use api::{
    ApiSettings, ReqwestApi, StoryApi, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_REQUEST_TIMEOUT,
};
pub use engine::{EngineCommand, EngineError, EngineHandle};
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use types::{ApiError, EngineEvent, FailureKind};
