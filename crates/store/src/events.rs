//! Order-placed event pipeline.
//!
//! Checkout publishes an [`OrderPlaced`] event to a queue and moves on; a
//! separate worker consumes the queue and sends the confirmation through a
//! [`Mailer`], retrying transient failures with backoff. Nothing on this
//! path can fail the checkout that triggered it.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

use oxcart_core::OrderId;

/// Delivery attempts per event before it is dropped.
const MAX_DELIVERY_ATTEMPTS: u32 = 3;

/// Base delay between delivery attempts; grows linearly per attempt.
const RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// Event published after an order has committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPlaced {
    pub order_id: OrderId,
}

/// Error publishing an event to the queue.
#[derive(Debug, Error)]
#[error("notification queue is closed")]
pub struct PublishError;

/// Outbound seam for checkout's only side effect.
pub trait EventSink {
    /// Enqueue an event for asynchronous handling.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] if the queue is no longer accepting events.
    fn publish(&self, event: OrderPlaced) -> Result<(), PublishError>;
}

/// Producer half of the notification queue.
#[derive(Debug, Clone)]
pub struct QueueSink {
    tx: mpsc::UnboundedSender<OrderPlaced>,
}

impl EventSink for QueueSink {
    fn publish(&self, event: OrderPlaced) -> Result<(), PublishError> {
        self.tx.send(event).map_err(|_| PublishError)
    }
}

/// Create the notification queue.
#[must_use]
pub fn queue() -> (QueueSink, mpsc::UnboundedReceiver<OrderPlaced>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueueSink { tx }, rx)
}

/// Error sending a confirmation.
#[derive(Debug, Error)]
#[error("mail delivery failed: {0}")]
pub struct MailerError(pub String);

/// Confirmation delivery backend.
pub trait Mailer: Send + Sync {
    /// Send the order confirmation for `order_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError`] if the confirmation could not be sent; the
    /// worker treats this as transient and retries.
    fn send_confirmation(&self, order_id: OrderId) -> Result<(), MailerError>;
}

/// Mailer that records deliveries in the structured log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send_confirmation(&self, order_id: OrderId) -> Result<(), MailerError> {
        tracing::info!(%order_id, "order confirmation sent");
        Ok(())
    }
}

/// Consume the queue until all producers are dropped.
pub async fn run_worker(mut rx: mpsc::UnboundedReceiver<OrderPlaced>, mailer: impl Mailer) {
    while let Some(event) = rx.recv().await {
        deliver(&mailer, event).await;
    }
}

/// Attempt delivery of one event, retrying with linear backoff.
///
/// An event that exhausts its attempts is logged and dropped; the queue
/// keeps draining.
async fn deliver(mailer: &impl Mailer, event: OrderPlaced) {
    for attempt in 1..=MAX_DELIVERY_ATTEMPTS {
        match mailer.send_confirmation(event.order_id) {
            Ok(()) => return,
            Err(err) if attempt < MAX_DELIVERY_ATTEMPTS => {
                tracing::warn!(
                    order_id = %event.order_id,
                    attempt,
                    error = %err,
                    "confirmation delivery failed; retrying"
                );
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }
            Err(err) => {
                tracing::error!(
                    order_id = %event.order_id,
                    error = %err,
                    "confirmation delivery failed; giving up"
                );
            }
        }
    }
}
