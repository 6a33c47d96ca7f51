//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_transport;

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use postboard::api::{FetchPolicy, GraphqlClient};
use postboard::navigation::Router;
use postboard::storage::MemoryStorage;
use postboard::store::Store;
use serde_json::{json, Value};

pub use mock_transport::{CapturedRequest, MockReply, MockTransport};

/// A store wired to scripted collaborators that the test can inspect.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub client: Arc<GraphqlClient>,
    pub storage: Arc<MemoryStorage>,
    pub router: Arc<Router>,
    pub store: Store,
}

pub fn harness() -> Harness {
    harness_with_policy(FetchPolicy::CacheFirst)
}

pub fn harness_with_policy(policy: FetchPolicy) -> Harness {
    let transport = MockTransport::new();
    let client = Arc::new(GraphqlClient::new(transport.clone()).with_fetch_policy(policy));
    let storage = Arc::new(MemoryStorage::new());
    let router = Arc::new(Router::default());
    let store = Store::new(client.clone(), storage.clone(), router.clone());
    Harness {
        transport,
        client,
        storage,
        router,
        store,
    }
}

pub fn post(id: &str, title: &str) -> Value {
    json!({"_id": id, "title": title, "imageUrl": format!("https://img/{}.png", id)})
}

/// Log sink for asserting on diagnostics.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture this thread's log output until the guard drops.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
