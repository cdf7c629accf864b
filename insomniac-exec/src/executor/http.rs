use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use insomniac_core::Request;
use insomniac_store::{Catalog, ResponseHeader, ResponsePatch};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use crate::executor::sender::{SendError, Sender};

/// Sends requests from a [`Catalog`] over HTTP.
///
/// Request fields are sent as imported; template tags are not rendered and
/// environment data is not applied.
pub struct HttpSender {
    catalog: Arc<dyn Catalog>,
    client: reqwest::Client,
}

impl HttpSender {
    pub fn new(catalog: Arc<dyn Catalog>) -> Result<Self, SendError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("insomniac/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SendError::Internal(format!("failed to build http client: {e}")))?;
        Ok(Self::with_client(catalog, client))
    }

    pub fn with_client(catalog: Arc<dyn Catalog>, client: reqwest::Client) -> Self {
        Self { catalog, client }
    }

    fn build(&self, request: &Request) -> Result<reqwest::RequestBuilder, SendError> {
        let method = Method::from_bytes(request.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| SendError::InvalidMethod(request.method.clone()))?;

        let mut url = url::Url::parse(&request.url).map_err(|e| SendError::InvalidUrl {
            url: request.url.clone(),
            message: e.to_string(),
        })?;
        let params: Vec<(&str, &str)> = request
            .enabled_parameters()
            .filter(|p| !p.name.is_empty())
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        let mut rb = self.client.request(method, url);
        let mut has_content_type = false;
        for header in request.enabled_headers().filter(|h| !h.name.is_empty()) {
            has_content_type |= header.name.eq_ignore_ascii_case(CONTENT_TYPE.as_str());
            rb = rb.header(header.name.as_str(), header.value.as_str());
        }

        if let Some(text) = &request.body.text {
            if !has_content_type {
                if let Some(mime) = request.body.mime_type.as_deref().filter(|m| !m.is_empty()) {
                    rb = rb.header(CONTENT_TYPE, mime);
                }
            }
            rb = rb.body(text.clone());
        }

        Ok(rb)
    }
}

#[async_trait]
impl Sender for HttpSender {
    async fn send(
        &self,
        request_id: &str,
        environment_id: &str,
    ) -> Result<ResponsePatch, SendError> {
        let request = self
            .catalog
            .get_request(request_id)
            .await
            .map_err(|e| SendError::Internal(e.to_string()))?
            .ok_or_else(|| SendError::UnknownRequest(request_id.to_string()))?;

        let rb = self.build(&request)?;

        let started = Instant::now();
        let resp = rb
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let url = resp.url().to_string();
        let status = resp.status();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str().ok().map(|v| ResponseHeader {
                    name: k.to_string(),
                    value: v.to_string(),
                })
            })
            .collect();

        let body = resp
            .bytes()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        Ok(ResponsePatch {
            request_id: request.id,
            environment_id: environment_id.to_string(),
            url,
            status_code: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body_size: body.len(),
            body: String::from_utf8_lossy(&body).into_owned(),
            elapsed_ms,
        })
    }
}
