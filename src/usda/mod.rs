//! FoodData Central access
//!
//! The search trait used by the estimator and its USDA HTTP implementation.

pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::FoodCandidate;

pub use client::UsdaClient;

/// Search error types
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("FoodData Central returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Search timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Search failed: {0}")]
    Other(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// A remote food-composition search
#[async_trait]
pub trait FoodSearch: Send + Sync {
    /// Search foods by free-text name, returning up to `page_size` candidates
    /// in relevance order
    async fn search(&self, query: &str, page_size: u32) -> SearchResult<Vec<FoodCandidate>>;
}

#[cfg(test)]
pub(crate) mod test_support {
    //! One-shot HTTP server returning a canned response

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve a single request on a local port
    ///
    /// Returns the base URL and a handle yielding the request head.
    pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 2048];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }
}
