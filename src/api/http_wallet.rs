//! Implements the `Wallet` trait with `reqwest` against the wallet HTTP API.

use crate::api::Wallet;
use crate::error::ApiError;
use crate::model::{HistoryResponse, Transaction, TransactionId};
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

/// Talks to the wallet API at `base`, sending `Authorization: Bearer <token>` on every request.
pub(crate) struct HttpWallet {
    base: Url,
    token: String,
    client: reqwest::Client,
}

impl HttpWallet {
    pub(crate) fn new(base: Url, token: impl Into<String>) -> Self {
        Self {
            base,
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
impl Wallet for HttpWallet {
    async fn history(&mut self) -> Result<Vec<Transaction>, ApiError> {
        let url = self.endpoint(&["history"]);
        trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let body: HistoryResponse = decode(response).await?;
        Ok(body.transactions)
    }

    async fn delete(&mut self, id: &TransactionId) -> Result<Vec<Transaction>, ApiError> {
        let url = self.endpoint(&["delete", id.as_str()]);
        trace!("DELETE {url}");
        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode(response).await
    }
}

/// Turns a non-success status into `ApiError::Status`, otherwise parses the body as JSON.
async fn decode<T>(response: reqwest::Response) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await.map_err(ApiError::Transport)?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::{Bytes, Incoming};
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper::{Method, Request, Response, StatusCode};
    use hyper_util::rt::TokioIo;
    use std::convert::Infallible;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    const TOKEN: &str = "token-123";

    const HISTORY: &str = r#"{"transactions": [
        {"_id": "a1", "type": "income", "value": 100.5, "description": "Salário", "date": "05/10"},
        {"_id": "b2", "type": "outcome", "value": 30.25, "description": "Mercado", "date": "06/10"}
    ]}"#;

    const AFTER_DELETE: &str =
        r#"[{"_id": "a1", "type": "income", "value": 100.5, "description": "Salário", "date": "05/10"}]"#;

    /// A tiny stand-in for the wallet API.
    async fn handle(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
        let expected = format!("Bearer {TOKEN}");
        let authorized = req
            .headers()
            .get(hyper::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some(expected.as_str());
        let (status, body) = if !authorized {
            (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
        } else {
            match (req.method(), req.uri().path()) {
                (&Method::GET, "/api/history") => (StatusCode::OK, HISTORY.to_string()),
                (&Method::DELETE, "/api/delete/b2") => (StatusCode::OK, AFTER_DELETE.to_string()),
                (&Method::DELETE, "/api/delete/a%20b") => (StatusCode::OK, "[]".to_string()),
                (&Method::DELETE, "/api/delete/boom") => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string())
                }
                (&Method::DELETE, "/api/delete/garbled") => {
                    (StatusCode::OK, "{not json".to_string())
                }
                _ => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            }
        };
        let mut response = Response::new(Full::new(Bytes::from(body)));
        *response.status_mut() = status;
        Ok(response)
    }

    async fn serve() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(_) => return,
                };
                tokio::spawn(async move {
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service_fn(handle))
                        .await;
                });
            }
        });
        addr
    }

    async fn wallet(token: &str) -> HttpWallet {
        let addr = serve().await;
        let base = Url::parse(&format!("http://{addr}/api/")).unwrap();
        HttpWallet::new(base, token)
    }

    #[test]
    fn test_endpoint_with_and_without_trailing_slash() {
        let a = HttpWallet::new(Url::parse("https://example.com/api/").unwrap(), "");
        let b = HttpWallet::new(Url::parse("https://example.com/api").unwrap(), "");
        assert_eq!(
            a.endpoint(&["history"]).as_str(),
            "https://example.com/api/history"
        );
        assert_eq!(
            b.endpoint(&["delete", "x"]).as_str(),
            "https://example.com/api/delete/x"
        );
    }

    #[test]
    fn test_endpoint_at_root() {
        let w = HttpWallet::new(Url::parse("https://example.com").unwrap(), "");
        assert_eq!(
            w.endpoint(&["history"]).as_str(),
            "https://example.com/history"
        );
    }

    #[tokio::test]
    async fn test_history() {
        let mut wallet = wallet(TOKEN).await;
        let list = wallet.history().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id().as_str(), "a1");
        assert_eq!(list[1].value().magnitude(), "30,25");
    }

    #[tokio::test]
    async fn test_history_bad_token() {
        let mut wallet = wallet("wrong").await;
        let err = wallet.history().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_delete_returns_updated_list() {
        let mut wallet = wallet(TOKEN).await;
        let list = wallet.delete(&TransactionId::from("b2")).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id().as_str(), "a1");
    }

    #[tokio::test]
    async fn test_delete_encodes_id() {
        let mut wallet = wallet(TOKEN).await;
        let list = wallet.delete(&TransactionId::from("a b")).await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_delete_server_error() {
        let mut wallet = wallet(TOKEN).await;
        let err = wallet.delete(&TransactionId::from("boom")).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_delete_undecodable_body() {
        let mut wallet = wallet(TOKEN).await;
        let err = wallet
            .delete(&TransactionId::from("garbled"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_error() {
        // Bind then drop so that nothing is listening on the port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let mut wallet = HttpWallet::new(base, TOKEN);
        let err = wallet.history().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
