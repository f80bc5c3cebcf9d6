//! Test configuration helpers for pointing a retriever at a mock search API

use stackx_topn::{Config, Retriever};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API path served by the mock server
pub const SEARCH_PATH: &str = "/2.3/search";

/// Config whose API root is the given mock server
pub fn mock_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("{}/2.3", server.uri());
    config
}

/// Retriever wired to the given mock server
pub fn mock_retriever(server: &MockServer) -> Retriever {
    Retriever::new(mock_config(server)).expect("mock config is valid")
}

/// Serve `response` for exactly one request of `page`
pub async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}
