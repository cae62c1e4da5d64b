//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;

use fragment_router::error::{HookError, LoadResult};
use fragment_router::fragment::{BehaviorModule, FragmentSource, StaticFragmentSource};
use fragment_router::FragmentId;

/// A page served by the mock server: markup, css, or a forced status.
#[derive(Clone)]
pub enum Page {
    Ok { markup: &'static str, css: &'static str },
    Status(u16),
}

#[derive(Default)]
struct ServerState {
    pages: HashMap<String, Page>,
    hits: Mutex<HashMap<String, usize>>,
}

/// Handle to a running mock page server.
pub struct PageServer {
    pub addr: SocketAddr,
    state: Arc<ServerState>,
}

impl PageServer {
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Requests served for `fragment` (all artifacts).
    pub fn hits(&self, fragment: &str) -> usize {
        self.state.hits.lock().unwrap().get(fragment).copied().unwrap_or(0)
    }
}

/// Start a server answering `/pages/{fragment}/{file}` on an ephemeral port.
pub async fn start_page_server(pages: Vec<(&'static str, Page)>) -> PageServer {
    let state = Arc::new(ServerState {
        pages: pages.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        hits: Mutex::new(HashMap::new()),
    });

    let app = axum::Router::new()
        .route("/pages/{fragment}/{file}", get(serve_page))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    PageServer { addr, state }
}

async fn serve_page(
    State(state): State<Arc<ServerState>>,
    Path((fragment, file)): Path<(String, String)>,
) -> (StatusCode, String) {
    *state.hits.lock().unwrap().entry(fragment.clone()).or_default() += 1;

    match state.pages.get(&fragment) {
        Some(Page::Ok { markup, css }) => match file.as_str() {
            "app.component.html" => (StatusCode::OK, markup.to_string()),
            "app.component.css" => (StatusCode::OK, css.to_string()),
            _ => (StatusCode::NOT_FOUND, String::new()),
        },
        Some(Page::Status(code)) => (
            StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            String::new(),
        ),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

/// Ordered record of lifecycle calls across all fragments.
#[derive(Clone, Default)]
pub struct HookLog(Arc<Mutex<Vec<String>>>);

impl HookLog {
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }
}

/// Logs `init:<name>:<param>:<from_cache>` and `destroy:<name>`.
pub struct RecordingBehavior {
    name: &'static str,
    log: HookLog,
    fail_init: bool,
}

impl RecordingBehavior {
    pub fn new(name: &'static str, log: HookLog) -> Self {
        Self { name, log, fail_init: false }
    }

    pub fn failing(name: &'static str, log: HookLog) -> Self {
        Self { name, log, fail_init: true }
    }
}

impl BehaviorModule for RecordingBehavior {
    fn on_init(&self, param: Option<&str>, from_cache: bool) -> Result<(), HookError> {
        self.log.push(format!("init:{}:{}:{}", self.name, param.unwrap_or("-"), from_cache));
        if self.fail_init {
            return Err(HookError::new(format!("{} refused to start", self.name)));
        }
        Ok(())
    }

    fn on_destroy(&self) -> Result<(), HookError> {
        self.log.push(format!("destroy:{}", self.name));
        Ok(())
    }
}

/// Holds every markup fetch until the gate is opened.
pub struct GatedSource {
    inner: StaticFragmentSource,
    gate: Arc<Semaphore>,
}

impl GatedSource {
    pub fn new(inner: StaticFragmentSource) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        (Self { inner, gate: gate.clone() }, gate)
    }

    pub fn fetch_count(&self, fragment: &str) -> usize {
        self.inner.fetch_count(fragment)
    }
}

#[async_trait]
impl FragmentSource for GatedSource {
    async fn fetch_markup(&self, fragment: &FragmentId) -> LoadResult<String> {
        let _permit = self.gate.acquire().await.unwrap();
        self.inner.fetch_markup(fragment).await
    }

    async fn fetch_style(&self, fragment: &FragmentId) -> LoadResult<String> {
        self.inner.fetch_style(fragment).await
    }
}

/// Standard three-page site used across tests.
pub fn site_source() -> StaticFragmentSource {
    StaticFragmentSource::new()
        .with_fragment("home", "<h1>Home</h1>", ".home{}")
        .with_fragment("about", "<h1>About</h1>", ".about{}")
        .with_fragment("404", "<h1>Not found</h1>", ".nf{}")
}
