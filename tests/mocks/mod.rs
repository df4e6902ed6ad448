//! Shared test server and fixtures for the e2e suites

pub mod fixtures;
pub mod test_server;

#[allow(unused_imports)]
pub use fixtures::search_body;
#[allow(unused_imports)]
pub use test_server::TestServer;
