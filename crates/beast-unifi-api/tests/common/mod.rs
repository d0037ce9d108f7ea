#![allow(dead_code, clippy::unwrap_used)]
// Shared wiremock harness.
//
// The clients are blocking, so the mock server gets its own runtime and
// the client is driven from the plain test thread.

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub struct MockApi {
    // Declared before `runtime` so it is dropped first.
    server: MockServer,
    runtime: Runtime,
}

impl MockApi {
    pub fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::builder().start());
        Self { server, runtime }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn received(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}

pub fn secret(s: &str) -> secrecy::SecretString {
    secrecy::SecretString::from(s.to_owned())
}
