//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use ctxlog::admin::{self, AdminState};
use ctxlog::{Level, LoggerConfig, LoggerRegistry, MemorySink};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[allow(dead_code)]
pub const API_KEY: &str = "test-admin-key";

/// Registry writing into memory, with `level` as the default threshold.
pub fn memory_registry(level: Level) -> (Arc<LoggerRegistry>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let registry = LoggerRegistry::with_sink(LoggerConfig::default().with_level(level), sink.clone());
    (Arc::new(registry), sink)
}

/// Running admin API bound to an ephemeral port.
#[allow(dead_code)]
pub struct AdminServer {
    pub addr: SocketAddr,
    stop: Option<oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl AdminServer {
    pub async fn start(registry: Arc<LoggerRegistry>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let state = AdminState::new(registry, API_KEY);
        tokio::spawn(async move {
            let shutdown = async {
                let _ = stopped.await;
            };
            admin::serve(listener, state, shutdown).await.unwrap();
        });

        Self {
            addr,
            stop: Some(stop),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for AdminServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}
