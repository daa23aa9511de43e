//! In-process stand-in for the time-tracking daemon.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tte_client::{Delivery, DeliveryConfig, HttpDelivery};
use tte_core::wire;

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// `VALID` for grammatical bodies, `INVALID` otherwise.
    Grammar,
    Fixed(StatusCode, &'static str),
}

#[derive(Clone)]
struct StubState {
    reply: Reply,
    received: Arc<Mutex<Vec<String>>>,
}

pub struct StubDaemon {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
}

impl StubDaemon {
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            received: received.clone(),
        };
        let router = Router::new().route("/", post(accept)).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(Self { addr, received })
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    pub fn delivery(&self) -> Arc<dyn Delivery> {
        delivery_to(&self.endpoint())
    }
}

async fn accept(State(state): State<StubState>, body: String) -> (StatusCode, String) {
    state.received.lock().unwrap().push(body.clone());
    match state.reply {
        Reply::Grammar if wire::parse(&body).is_some() => (StatusCode::OK, wire::ACK_VALID.into()),
        Reply::Grammar => (StatusCode::OK, wire::ACK_INVALID.into()),
        Reply::Fixed(status, text) => (status, text.into()),
    }
}

pub fn delivery_to(endpoint: &str) -> Arc<dyn Delivery> {
    let config = DeliveryConfig::default()
        .with_endpoint(endpoint)
        .with_timeout(Some(Duration::from_secs(5)));
    Arc::new(HttpDelivery::new(&config).unwrap())
}

/// An endpoint nobody listens on.
pub async fn unreachable_endpoint() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/"))
}
