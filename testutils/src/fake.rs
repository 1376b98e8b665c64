use httpmock::prelude::*;
use httpmock::{
    Mock,
    Then,
    When,
};

/// A thin wrapper around `httpmock`'s `MockServer` that records every handler registered with
/// `handle` and can assert all of them fired, mirroring the pattern the reference codebase uses
/// for its own fake API server in tests.
pub struct MockServerBuilder {
    server: MockServer,
    handlers: Vec<Box<dyn Fn(When, Then)>>,
    mock_ids: Vec<usize>,
}

fn print_req(req: &HttpMockRequest) -> bool {
    println!("    received: {} {}", req.method, req.path);
    true
}

impl Default for MockServerBuilder {
    fn default() -> MockServerBuilder {
        MockServerBuilder::new()
    }
}

impl MockServerBuilder {
    pub fn new() -> MockServerBuilder {
        MockServerBuilder { server: MockServer::start(), handlers: vec![], mock_ids: vec![] }
    }

    pub fn handle<F: Fn(When, Then) + 'static>(&mut self, f: F) -> &mut Self {
        self.handlers.push(Box::new(move |w, t| {
            let w = w.matches(print_req);
            f(w, t);
        }));
        self
    }

    pub fn build(&mut self) {
        for f in self.handlers.iter() {
            self.mock_ids.push(self.server.mock(f).id);
        }
        self.server.mock(|when, _| {
            when.matches(print_req);
        });
    }

    pub fn assert(&self) {
        for id in &self.mock_ids {
            Mock::new(*id, &self.server).assert();
        }
    }

    pub fn url(&self) -> String {
        self.server.url("/")
    }
}

/// Starts a fake API server and builds a `cp_api::Client` pointed at it.
pub fn make_fake_api_server() -> (MockServerBuilder, cp_api::Client) {
    let builder = MockServerBuilder::new();
    let client = cp_api::Client::new(&builder.url()).expect("valid mock server URL");
    (builder, client)
}
