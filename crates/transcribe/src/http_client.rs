use std::{sync::OnceLock, time::Duration};

use reqwest::Client;
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};

/// Shared HTTP client for audio downloads and backend requests
pub(crate) fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            let mut headers = HeaderMap::new();
            headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

            Client::builder()
                .timeout(Duration::from_secs(300))
                .pool_idle_timeout(Some(Duration::from_secs(5)))
                .tcp_nodelay(true)
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .default_headers(headers)
                .build()
                .expect("failed to build default HTTP client")
        })
        .clone()
}
