// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Transport lifecycle: connect, read, reconnect.
//!
//! The manager owns the socket task and a single optional retry timer.
//! Lifecycle rules (mirrored by the unit tests below):
//!
//! - `connect()` is idempotent while connecting or open, and advances the
//!   endpoint ring on every attempt so repeated failures rotate through
//!   all candidates.
//! - A transport error never schedules a retry itself; the close that
//!   follows it does. A failed connect attempt synthesizes the same
//!   error-then-close ordering.
//! - A close schedules exactly one retry after [`RETRY_DELAY`]; a
//!   successful open cancels any pending retry.
//! - `send` is best-effort and silently dropped unless the connection is
//!   open.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::endpoint::EndpointRing;

/// Fixed delay between a close and the next connection attempt.
pub const RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Connection lifecycle state. Exactly one per client instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnState {
    /// No attempt made yet.
    #[default]
    Idle,
    /// An attempt is in flight.
    Connecting,
    /// The socket is open; sends are delivered best-effort.
    Open,
    /// The socket closed; a retry is (or is about to be) scheduled.
    ClosedPendingRetry,
}

/// Events surfaced by the connection manager to the sync loop.
#[derive(Clone, Debug, PartialEq)]
pub enum TransportEvent {
    /// The socket opened against `url`.
    Opened {
        /// Endpoint that opened.
        url: String,
    },
    /// A transport error occurred (status only; the close path follows).
    Failed {
        /// Endpoint that errored.
        url: String,
    },
    /// The socket closed (a retry will be scheduled).
    Closed {
        /// Endpoint that closed.
        url: String,
    },
    /// An inbound text frame.
    Text(String),
    /// An inbound binary frame.
    Binary(Vec<u8>),
    /// The retry timer fired; the manager reconnects on processing this.
    RetryElapsed,
}

/// Owns the WebSocket lifecycle, candidate selection, and retry timer.
pub struct ConnectionManager {
    ring: EndpointRing,
    state: ConnState,
    events_tx: mpsc::UnboundedSender<TransportEvent>,
    events_rx: mpsc::UnboundedReceiver<TransportEvent>,
    outbound: Option<mpsc::UnboundedSender<String>>,
    retry: Option<JoinHandle<()>>,
    socket_task: Option<JoinHandle<()>>,
}

impl ConnectionManager {
    /// Create a manager over the given endpoint ring.
    pub fn new(ring: EndpointRing) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            ring,
            state: ConnState::Idle,
            events_tx,
            events_rx,
            outbound: None,
            retry: None,
            socket_task: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnState {
        self.state
    }

    /// Start a connection attempt against the next candidate.
    ///
    /// No-op while an attempt is in flight or the socket is open. Returns
    /// immediately; the attempt runs on a spawned task.
    pub fn connect(&mut self) {
        if matches!(self.state, ConnState::Connecting | ConnState::Open) {
            return;
        }
        let url = self.ring.next_url().to_owned();
        self.state = ConnState::Connecting;
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        self.outbound = Some(out_tx);
        tracing::info!(%url, "connecting");
        self.socket_task = Some(tokio::spawn(run_socket(
            url,
            out_rx,
            self.events_tx.clone(),
        )));
    }

    /// Send a text message, best-effort.
    ///
    /// Dropped silently (not queued, not an error) unless the connection
    /// is open; callers must not assume delivery.
    pub fn send(&self, text: String) {
        if self.state != ConnState::Open {
            tracing::debug!("dropping outbound message; connection not open");
            return;
        }
        if let Some(tx) = &self.outbound {
            if tx.send(text).is_err() {
                tracing::debug!("dropping outbound message; socket task ended");
            }
        }
    }

    /// Wait for the next transport event, applying lifecycle transitions
    /// before handing it to the caller. Returns `None` only if the event
    /// channel is unexpectedly gone.
    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        let ev = self.events_rx.recv().await?;
        self.apply(&ev);
        Some(ev)
    }

    fn apply(&mut self, ev: &TransportEvent) {
        match ev {
            TransportEvent::Opened { url } => {
                tracing::info!(%url, "connection open");
                self.state = ConnState::Open;
                if let Some(timer) = self.retry.take() {
                    timer.abort();
                }
            }
            TransportEvent::Failed { url } => {
                // Status only; the close that follows owns retry scheduling.
                tracing::warn!(%url, "transport error");
            }
            TransportEvent::Closed { url } => {
                tracing::info!(%url, "connection closed");
                self.state = ConnState::ClosedPendingRetry;
                self.outbound = None;
                if self.retry.is_none() {
                    let tx = self.events_tx.clone();
                    self.retry = Some(tokio::spawn(async move {
                        tokio::time::sleep(RETRY_DELAY).await;
                        let _ = tx.send(TransportEvent::RetryElapsed);
                    }));
                }
            }
            TransportEvent::RetryElapsed => {
                self.retry = None;
                self.connect();
            }
            TransportEvent::Text(_) | TransportEvent::Binary(_) => {}
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        if let Some(timer) = self.retry.take() {
            timer.abort();
        }
        if let Some(task) = self.socket_task.take() {
            task.abort();
        }
    }
}

async fn run_socket(
    url: String,
    mut out_rx: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<TransportEvent>,
) {
    let stream = match connect_async(&url).await {
        Ok((stream, _response)) => stream,
        Err(err) => {
            tracing::debug!(%url, %err, "connect attempt failed");
            let _ = events.send(TransportEvent::Failed { url: url.clone() });
            let _ = events.send(TransportEvent::Closed { url });
            return;
        }
    };
    let _ = events.send(TransportEvent::Opened { url: url.clone() });

    let (mut sink, mut source) = stream.split();
    let send_task = tokio::spawn(async move {
        while let Some(text) = out_rx.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = source.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                let _ = events.send(TransportEvent::Text(text.as_str().to_owned()));
            }
            Ok(Message::Binary(bytes)) => {
                let _ = events.send(TransportEvent::Binary(bytes.to_vec()));
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {} // ping/pong handled by the library
            Err(err) => {
                tracing::debug!(%url, %err, "websocket error");
                let _ = events.send(TransportEvent::Failed { url: url.clone() });
                break;
            }
        }
    }

    send_task.abort();
    let _ = events.send(TransportEvent::Closed { url });
}
