//! Browser plumbing: `fetch`-backed transport and file-picker reading.

use js_sys::{Array, Uint8Array};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FileList, FormData, Headers, Request, RequestInit, Response};

use crate::dispatch::Transport;
use crate::error::RemoteError;
use crate::models::CsvAttachment;

/// Best-effort text for a thrown JS value.
fn js_error_text(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

fn browser_err(value: JsValue) -> RemoteError {
    RemoteError::Browser(js_error_text(&value))
}

/// [`Transport`] over `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn send(&self, url: &str, init: &RequestInit) -> Result<String, RemoteError> {
        let request = Request::new_with_str_and_init(url, init).map_err(browser_err)?;
        let reply = JsFuture::from(gloo_utils::window().fetch_with_request(&request))
            .await
            .map_err(|e| RemoteError::Network(js_error_text(&e)))?;
        let response: Response = reply
            .dyn_into()
            .map_err(|_| RemoteError::Browser("fetch resolved to a non-Response".into()))?;

        if !response.ok() {
            return Err(RemoteError::Status(response.status()));
        }

        let body = JsFuture::from(response.text().map_err(browser_err)?)
            .await
            .map_err(|e| RemoteError::Network(js_error_text(&e)))?;
        body.as_string()
            .ok_or_else(|| RemoteError::Decode("response body is not text".into()))
    }
}

impl Transport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<String, RemoteError> {
        let headers = Headers::new().map_err(browser_err)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(browser_err)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        self.send(url, &init).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        attachment: &CsvAttachment,
    ) -> Result<String, RemoteError> {
        let bytes = Uint8Array::from(attachment.content.as_slice());
        let parts = Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type("text/csv");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(browser_err)?;

        let form = FormData::new().map_err(browser_err)?;
        form.append_with_blob_and_filename(field, &blob, &attachment.file_name)
            .map_err(browser_err)?;

        // No Content-Type header: the browser adds the multipart boundary itself.
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        self.send(url, &init).await
    }

    async fn get(&self, url: &str) -> Result<String, RemoteError> {
        let init = RequestInit::new();
        init.set_method("GET");
        self.send(url, &init).await
    }
}

async fn read_file(file: &File) -> Result<CsvAttachment, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(CsvAttachment {
        file_name: file.name(),
        content: Uint8Array::new(&buffer).to_vec(),
    })
}

/// Load every selected file into memory. Unreadable files are skipped.
pub async fn read_selected_files(files: Option<FileList>) -> Vec<CsvAttachment> {
    let Some(files) = files else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(files.length() as usize);
    for idx in 0..files.length() {
        let Some(file) = files.get(idx) else { continue };
        match read_file(&file).await {
            Ok(attachment) => out.push(attachment),
            Err(e) => warn!("Could not read {}: {}", file.name(), js_error_text(&e)),
        }
    }
    out
}
