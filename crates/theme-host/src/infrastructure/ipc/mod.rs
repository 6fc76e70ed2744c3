//! Request/response plumbing between a remote caller and the coordinator.
//!
//! - **`messages`** – JSON request and response types.
//! - **`dispatcher`** – Runs each request against the coordinator and turns
//!   the result into exactly one response.
//! - **`stdio`** – Line-delimited JSON transport over any async reader/writer.

pub mod dispatcher;
pub mod messages;
pub mod stdio;

pub use dispatcher::RequestDispatcher;
pub use messages::{ThemeRequest, ThemeResponse};
pub use stdio::{serve, TransportError};
