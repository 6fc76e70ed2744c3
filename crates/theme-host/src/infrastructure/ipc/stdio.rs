//! Line-delimited JSON transport.
//!
//! One request per input line, one response per output line.  The host binary
//! runs this over stdin/stdout; tests run it over byte slices.
//!
//! Two loops run side by side:
//!
//! ```text
//! reader ─▶ read loop ─▶ dispatcher (task per request) ─▶ mpsc ─▶ write loop ─▶ writer
//! ```
//!
//! Responses are written as soon as they are ready, so their order follows
//! completion, not arrival.  The write loop ends once the input is exhausted
//! and every spawned request has sent its response.

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, warn};

use crate::application::coordinator::ActivationCoordinator;
use crate::infrastructure::ipc::dispatcher::RequestDispatcher;
use crate::infrastructure::ipc::messages::{recover_correlation_id, ThemeRequest, ThemeResponse};

/// Error type for the stdio transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Reading a request line failed.
    #[error("failed to read request: {0}")]
    Read(#[source] std::io::Error),

    /// Writing a response line failed.
    #[error("failed to write response: {0}")]
    Write(#[source] std::io::Error),

    /// A response could not be encoded as JSON.
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serves requests from `reader` until end of input, writing responses to
/// `writer`.  Returns the writer once every response has been flushed.
///
/// # Errors
///
/// Returns [`TransportError::Read`] if the input fails, and
/// [`TransportError::Write`] or [`TransportError::Encode`] if a response
/// cannot be written.  Requests already in flight still run to completion.
pub async fn serve<R, W>(
    coordinator: Arc<ActivationCoordinator>,
    reader: R,
    writer: W,
) -> Result<W, TransportError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let dispatcher = RequestDispatcher::new(coordinator, tx);

    let (read_result, write_result) =
        tokio::join!(read_requests(dispatcher, reader), write_responses(rx, writer));

    read_result?;
    write_result
}

async fn read_requests<R>(
    dispatcher: RequestDispatcher,
    mut reader: R,
) -> Result<(), TransportError>
where
    R: AsyncBufRead + Unpin,
{
    let mut in_flight = JoinSet::new();
    let mut buf = Vec::new();

    let outcome = loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(TransportError::Read(e)),
        }
        reap_finished(&mut in_flight);

        // A line that is not UTF-8 is just another malformed request.
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!("skipping request line that is not valid UTF-8: {e}");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<ThemeRequest>(line) {
            Ok(request) => {
                in_flight.spawn(dispatcher.respond(request));
            }
            Err(e) => match recover_correlation_id(line) {
                Some(correlation_id) => {
                    warn!(correlation_id = %correlation_id, "rejecting malformed request: {e}");
                    dispatcher.send(ThemeResponse::error(
                        correlation_id,
                        format!("invalid request: {e}"),
                    ));
                }
                None => warn!("skipping malformed request line: {e}"),
            },
        }
    };

    while let Some(result) = in_flight.join_next().await {
        log_task_result(result);
    }
    debug!("input closed, all requests answered");

    // Dropping the last sender ends the write loop.
    drop(dispatcher);
    outcome
}

/// Collects tasks that have already finished, so a long session does not
/// accumulate one entry per request.
fn reap_finished(in_flight: &mut JoinSet<()>) {
    while let Some(result) = in_flight.try_join_next() {
        log_task_result(result);
    }
}

fn log_task_result(result: Result<(), JoinError>) {
    if let Err(e) = result {
        error!("request task failed: {e}");
    }
}

async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<ThemeResponse>,
    mut writer: W,
) -> Result<W, TransportError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)?;
        line.push(b'\n');
        writer.write_all(&line).await.map_err(TransportError::Write)?;
        writer.flush().await.map_err(TransportError::Write)?;
    }
    Ok(writer)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
