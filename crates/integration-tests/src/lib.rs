//! Test harness for driving the Oxcart API in process.
//!
//! Builds the full router over a fresh store and issues requests through
//! `tower::ServiceExt::oneshot`, so the suite runs hermetically: no
//! listening socket, no external services. The harness keeps direct handles
//! to the backing store (for seeding and state assertions) and to the
//! notification queue's consumer end (to observe what checkout enqueued).

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;

use oxcart_api::routes::router;
use oxcart_api::state::AppState;
use oxcart_core::ProductId;
use oxcart_store::Store;
use oxcart_store::events::{OrderPlaced, queue};
use oxcart_store::services::products;

/// In-process application under test.
pub struct TestApp {
    router: Router,
    store: Store,
    events: UnboundedReceiver<OrderPlaced>,
}

impl TestApp {
    /// Build a fresh app over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Store::new();
        let (sink, events) = queue();
        let state = AppState::new(store.clone(), sink);
        Self {
            router: router(state),
            store,
            events,
        }
    }

    /// Direct handle to the backing store, for seeding and assertions.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Seed a catalog product and return its ID.
    pub fn seed_product(&self, title: &str, unit_price: Decimal) -> ProductId {
        products::create_product(&self.store, title, unit_price).id
    }

    /// Pop the next enqueued order-confirmation event, if any.
    pub fn next_event(&mut self) -> Option<OrderPlaced> {
        self.events.try_recv().ok()
    }

    /// Issue a request and return its status and parsed JSON body.
    ///
    /// An empty body parses as `Value::Null`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be executed or a non-empty body is not
    /// valid JSON.
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request should execute");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        (status, body)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity headers for an authenticated requester.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: i32,
    pub is_staff: bool,
}

impl Identity {
    /// A regular authenticated user.
    #[must_use]
    pub const fn user(user_id: i32) -> Self {
        Self {
            user_id,
            is_staff: false,
        }
    }

    /// A staff member.
    #[must_use]
    pub const fn staff(user_id: i32) -> Self {
        Self {
            user_id,
            is_staff: true,
        }
    }
}

/// Build a request carrying a JSON body.
///
/// # Panics
///
/// Panics if the request parts are invalid.
#[must_use]
pub fn json_request(
    method: &str,
    uri: &str,
    body: &Value,
    identity: Option<Identity>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(identity) = identity {
        builder = builder.header("x-user-id", identity.user_id.to_string());
        if identity.is_staff {
            builder = builder.header("x-user-is-staff", "true");
        }
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Build a bodyless request.
///
/// # Panics
///
/// Panics if the request parts are invalid.
#[must_use]
pub fn bare_request(method: &str, uri: &str, identity: Option<Identity>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(identity) = identity {
        builder = builder.header("x-user-id", identity.user_id.to_string());
        if identity.is_staff {
            builder = builder.header("x-user-is-staff", "true");
        }
    }
    builder.body(Body::empty()).expect("request should build")
}
