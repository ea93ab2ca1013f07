use std::time::Duration;

use axum::Router;

use crate::{config::ClientConfig, transport::ApiClient};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock backend");
    });

    format!("http://{addr}")
}

pub fn client_for(base_url: &str) -> ApiClient {
    let config = ClientConfig::new(base_url, Duration::from_secs(10));
    ApiClient::new(&config).expect("api client")
}
