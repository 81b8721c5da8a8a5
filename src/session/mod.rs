// Session-state exports
pub mod disruption;
pub mod engine;
pub mod notify;
pub mod registry;

pub use disruption::DisruptionMonitor;
pub use engine::{Engine, EngineError};
pub use notify::NotificationDispatcher;
pub use registry::AlertRegistry;
