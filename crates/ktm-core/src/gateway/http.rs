//! HTTP implementation of the student gateway (reqwest).

use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use super::StudentGateway;
use crate::config::ClientConfig;
use crate::error::{KtmError, KtmResult};
use crate::types::{MutationAck, StudentId, StudentPayload, StudentRecord};

/// Gateway client talking JSON and multipart over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    students_url: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl HttpGateway {
    /// Build a client for `config.gateway_url`.
    pub fn new(config: &ClientConfig) -> KtmResult<Self> {
        let mut base_url = Url::parse(&config.gateway_url)?;
        if base_url.cannot_be_a_base() {
            return Err(KtmError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        // Keep any path prefix when joining endpoint names
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let students_url = base_url.join("students")?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            students_url,
        })
    }

    /// Base address the gateway was built with.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn student_url(&self, id: &StudentId) -> KtmResult<Url> {
        let mut url = self.students_url.clone();
        url.path_segments_mut()
            .map_err(|_| KtmError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id.as_str());
        Ok(url)
    }

    async fn send_form(&self, method: reqwest::Method, url: Url, payload: &StudentPayload) -> KtmResult<MutationAck> {
        let form = multipart_form(payload)?;
        tracing::debug!(%method, %url, has_photo = payload.photo.is_some(), "Sending student form");

        let response = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(MutationAck::default());
        }
        match serde_json::from_slice(&body) {
            Ok(ack) => Ok(ack),
            Err(e) => {
                tracing::debug!("Unrecognized mutation response body: {}", e);
                Ok(MutationAck::default())
            }
        }
    }
}

impl StudentGateway for HttpGateway {
    async fn list_students(&self) -> KtmResult<Vec<StudentRecord>> {
        let response = self
            .client
            .get(self.students_url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        // An empty table is served as `null`
        let records: Option<Vec<StudentRecord>> = response.json().await?;
        Ok(records.unwrap_or_default())
    }

    async fn create_student(&self, payload: &StudentPayload) -> KtmResult<MutationAck> {
        self.send_form(reqwest::Method::POST, self.students_url.clone(), payload)
            .await
    }

    async fn update_student(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> KtmResult<MutationAck> {
        let url = self.student_url(id)?;
        self.send_form(reqwest::Method::PUT, url, payload).await
    }

    async fn delete_student(&self, id: &StudentId) -> KtmResult<()> {
        let url = self.student_url(id)?;
        let response = self
            .client
            .delete(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_photo(&self, path: &str) -> KtmResult<Vec<u8>> {
        let location = resolve_photo_url(self.base_url.as_str(), path)
            .ok_or_else(|| KtmError::NotFound(format!("photo path '{}'", path)))?;
        let response = self.client.get(location).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    fn photo_location(&self, path: &str) -> Option<String> {
        resolve_photo_url(self.base_url.as_str(), path)
    }
}

fn multipart_form(payload: &StudentPayload) -> KtmResult<Form> {
    let mut form = Form::new();
    if let Some(photo) = &payload.photo {
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.mime_type)?;
        form = form.part("photo", part);
    }
    Ok(form
        .text("nim", payload.nim.clone())
        .text("name", payload.name.clone())
        .text("faculty", payload.faculty.clone())
        .text("major", payload.major.clone()))
}

async fn ensure_success(response: Response) -> KtmResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    let err = gateway_error(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), "Gateway request failed: {}", err);
    Err(err)
}

/// Map a failed response to an error, preferring the body's `error` field.
pub(crate) fn gateway_error(status: u16, body: &[u8]) -> KtmError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status));
    KtmError::Gateway { status, message }
}

/// Resolve a stored photo path against the gateway base address.
///
/// Repeated slashes collapse to one. Absolute `http(s)` and `data:`
/// locations pass through. Blank paths have no location.
pub fn resolve_photo_url(base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        return Some(path.to_string());
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    Some(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segments.join("/")
    ))
}
