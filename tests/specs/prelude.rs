//! Shared scaffolding for the workspace specs: spins the real,
//! compiled gateway router on an ephemeral TCP port, wired to an
//! in-memory publisher/directory so tests can assert on what would have
//! reached the broker without a live RabbitMQ instance.

use inn_actions::register_builtins;
use inn_broker::test_support::{InMemoryDirectory, RecordingPublisher};
use inn_core::{FakeClock, SequentialIdGen};
use inn_gateway::GatewayState;
use inn_registry::IntegrationRegistry;
use tokio::net::TcpListener;

pub type TestState = GatewayState<RecordingPublisher, InMemoryDirectory, FakeClock, SequentialIdGen>;

/// A running instance of the gateway bound to `127.0.0.1` on a free port,
/// with handles to the fakes standing in for the broker so assertions can
/// inspect what was published and seed what the directory returns.
pub struct TestServer {
    pub base_url: String,
    pub directory: InMemoryDirectory,
    pub publisher: RecordingPublisher,
}

impl TestServer {
    /// Starts a server with the default Lazada-or-catch-all routing rules
    /// used throughout spec §8's scenarios.
    pub async fn start() -> Self {
        let directory = InMemoryDirectory::default();
        let publisher = RecordingPublisher::new();
        Self::start_with(directory, publisher).await
    }

    pub async fn start_with(directory: InMemoryDirectory, publisher: RecordingPublisher) -> Self {
        let registry = IntegrationRegistry::new();
        register_builtins(&registry);
        let router = EventRouter::new(vec![
            Rule::new(
                "lazada_pipeline_queue",
                Value::from_pairs([("source", Value::from("lazada"))]),
            ),
            Rule::default_route("inn_pipeline_queue"),
        ]);
        let state: TestState = GatewayState::new(
            registry,
            publisher.clone(),
            directory.clone(),
            FakeClock::default(),
            SequentialIdGen::new("exec"),
            "inn_event_queue",
        );
        let app = inn_gateway::router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            directory,
            publisher,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
