//! Domain event system.
//! Trait with no-op defaults, synchronous dispatch, zero overhead when empty.

pub mod dispatcher;
pub mod handler;
pub mod tracing_handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::ReqEventHandler;
pub use tracing_handler::TracingEventHandler;
pub use types::*;
