use metricdash_core::{FetchError, MetricsSource};
use std::future::Future;
use std::time::Duration;

/// Build an HTTP client with the per-request timeout applied.
pub fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    let builder = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("metricdash/", env!("CARGO_PKG_VERSION")));
    Ok(builder.build()?)
}

/// Normalize non-2xx responses into errors while returning the response on success.
pub fn handle_error(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    Err(FetchError::Status(resp.status().as_u16()))
}

/// Plain GET against the exposition endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout.as_millis() as u64)
        } else if err.is_connect() {
            FetchError::Connect(error_chain(&err))
        } else {
            FetchError::Request(error_chain(&err))
        }
    }
}

impl MetricsSource for HttpSource {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send {
        async move {
            let resp = self
                .client
                .get(&self.endpoint)
                .send()
                .await
                .map_err(|e| self.classify(e))?;
            let resp = handle_error(resp)?;
            resp.text().await.map_err(|e| self.classify(e))
        }
    }
}

/// reqwest 的顶层错误信息比较笼统，拼上 source 链便于定位
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
