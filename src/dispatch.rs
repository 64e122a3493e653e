//! Request dispatch: one outbound call per flow, decoded into typed responses.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{EndpointConfig, CSV_FIELD_NAME};
use crate::error::RemoteError;
use crate::models::{
    AnalyticsResponse, CsvAttachment, CsvSummaryResponse, PredictionResponse, SessionFeatures,
    WebsiteAnalysisRequest, WebsiteAnalysisResponse,
};
use crate::Flow;

/// The HTTP layer. Each call resolves to the body of a 2xx response;
/// anything else is a [`RemoteError`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: String) -> Result<String, RemoteError>;

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        attachment: &CsvAttachment,
    ) -> Result<String, RemoteError>;

    async fn get(&self, url: &str) -> Result<String, RemoteError>;
}

pub struct Dispatcher<T> {
    transport: T,
    endpoints: EndpointConfig,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, endpoints: EndpointConfig) -> Self {
        Self { transport, endpoints }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn analyze_website(
        &self,
        request: &WebsiteAnalysisRequest,
    ) -> Result<WebsiteAnalysisResponse, RemoteError> {
        self.post_json(Flow::WebsiteAnalysis, request).await
    }

    pub async fn upload_csv(
        &self,
        attachment: &CsvAttachment,
    ) -> Result<CsvSummaryResponse, RemoteError> {
        let url = self.endpoints.url_for(Flow::CsvUpload);
        debug!(
            "POST {} multipart {} ({} bytes)",
            url,
            attachment.file_name,
            attachment.content.len()
        );
        let body = self
            .transport
            .post_multipart(&url, CSV_FIELD_NAME, attachment)
            .await?;
        decode(&body)
    }

    pub async fn predict(
        &self,
        features: &SessionFeatures,
    ) -> Result<PredictionResponse, RemoteError> {
        self.post_json(Flow::SessionPrediction, features).await
    }

    pub async fn analytics(&self) -> Result<AnalyticsResponse, RemoteError> {
        let url = self.endpoints.url_for(Flow::Analytics);
        debug!("GET {}", url);
        let body = self.transport.get(&url).await?;
        decode(&body)
    }

    async fn post_json<B, R>(&self, flow: Flow, body: &B) -> Result<R, RemoteError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.endpoints.url_for(flow);
        let payload = serde_json::to_string(body)?;
        debug!("POST {} ({} bytes)", url, payload.len());
        let text = self.transport.post_json(&url, payload).await?;
        decode(&text)
    }
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, RemoteError> {
    Ok(serde_json::from_str(body)?)
}
