use async_trait::async_trait;
use log::{ debug, warn };
use reqwest::Client as HttpClient;
use url::Url;
use super::{ ChatTransport, TransportError };
use crate::models::wire::{ ChatRequest, ChatResponse };

pub const DEFAULT_CHAT_PATH: &str = "/chat";

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str, chat_path: Option<&str>) -> Result<Self, TransportError> {
        let base = Url::parse(base_url)?;
        let endpoint = base.join(chat_path.unwrap_or(DEFAULT_CHAT_PATH))?;

        Ok(Self {
            http: HttpClient::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        debug!("POST {} ({} mode)", self.endpoint, request.mode);
        let resp = self.http.post(self.endpoint.clone()).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            // The body still decides what is rendered.
            warn!("Chat endpoint answered with status {}", status);
        }

        let body = resp.bytes().await?;
        let data = ChatResponse::from_body(&body)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_default_path() {
        let transport = HttpTransport::new("http://127.0.0.1:5000", None).unwrap();
        assert_eq!(transport.endpoint().as_str(), "http://127.0.0.1:5000/chat");
    }

    #[test]
    fn custom_path_replaces_base_path() {
        let transport = HttpTransport::new("http://localhost:8080/app/", Some("/api/chat")).unwrap();
        assert_eq!(transport.endpoint().as_str(), "http://localhost:8080/api/chat");
    }

    #[test]
    fn rejects_bad_url() {
        assert!(matches!(HttpTransport::new("not a url", None), Err(TransportError::Endpoint(_))));
    }
}
