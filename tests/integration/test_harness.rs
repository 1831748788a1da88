// Test harness for integration tests
// Provides a throwaway HTTP origin and an in-memory caching client

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use swr_interceptor::{RequestExecutor, SwrError, SwrRequest, SwrResponse};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Minimal HTTP/1.1 origin answering every request with the same body and
/// Cache-Control header. Records the raw request heads it receives.
pub struct TestOrigin {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestOrigin {
    pub async fn start(cache_control: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test origin");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }
                    recorded
                        .lock()
                        .unwrap()
                        .push(String::from_utf8_lossy(&head).to_lowercase());

                    let response = format!(
                        "HTTP/1.1 200 OK\r\nCache-Control: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        cache_control,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Lower-cased request heads received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// A port with nothing listening on it
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    listener.local_addr().expect("Failed to read local addr").port()
}

/// Stores every network response by URI and serves `only-if-cached`
/// requests from that store, answering 504 on a miss.
pub struct MemoryCachingExecutor<E> {
    inner: E,
    store: Mutex<HashMap<String, SwrResponse>>,
}

impl<E> MemoryCachingExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            store: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<E: RequestExecutor> RequestExecutor for MemoryCachingExecutor<E> {
    async fn execute(&self, request: SwrRequest) -> Result<SwrResponse, SwrError> {
        let key = request.uri.to_string();

        if request.cache_control.only_if_cached {
            let cached = self.store.lock().unwrap().get(&key).cloned();
            return match cached {
                Some(response) => Ok(response),
                None => self.inner.execute(request).await,
            };
        }

        let response = self.inner.execute(request).await?;
        self.store.lock().unwrap().insert(key, response.clone());
        Ok(response)
    }
}
