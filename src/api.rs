//! REST client for the chat backend. All calls are plain request/response;
//! the send endpoint is multipart (text field + image file parts), the rest
//! is JSON.

use gloo_net::http::{Request, Response};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::errors::ApiError;
use crate::models::{ChatResponse, Conversation, ConversationSummary, ImageInfo};

/// Backend origin. Overridable at compile time so a deployed build can point
/// somewhere other than the dev server.
fn server_base() -> &'static str {
    option_env!("CHIMERA_SERVER_URL").unwrap_or("http://localhost:8000")
}

fn url(path: &str) -> String {
    format!("{}/api{path}", server_base())
}

/// URL an uploaded image is served from; the backend exposes `file_path`
/// as a static file relative to its origin.
pub fn image_url(image: &ImageInfo) -> String {
    format!("{}/{}", server_base(), image.file_path)
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

fn js_err(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Pass 2xx responses through; decode `{"detail": ...}` from anything else.
async fn check(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let detail = resp.json::<ErrorDetail>().await.ok().map(|b| b.detail);
    Err(ApiError::server(status, detail))
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Sends a message, with optional image attachments, to an existing
/// conversation (`Some(id)`) or a fresh one (`None`). The reply carries the
/// stored user message, the assistant's answer, and the conversation id.
pub async fn send_message(
    text: &str,
    conversation_id: Option<i64>,
    images: &[File],
) -> Result<ChatResponse, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Request(js_err(e)))?;
    form.append_with_str("message", text)
        .map_err(|e| ApiError::Request(js_err(e)))?;
    if let Some(id) = conversation_id {
        form.append_with_str("conversation_id", &id.to_string())
            .map_err(|e| ApiError::Request(js_err(e)))?;
    }
    for file in images {
        // The browser fills in the multipart content type per part.
        form.append_with_blob_and_filename("images", file, &file.name())
            .map_err(|e| ApiError::Request(js_err(e)))?;
    }

    let resp = Request::post(&url("/chat/message"))
        .body(form)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(check(resp).await?).await
}

/// Fetches the conversation summaries, newest activity first.
pub async fn list_conversations() -> Result<Vec<ConversationSummary>, ApiError> {
    let resp = Request::get(&url("/chat/conversations"))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(check(resp).await?).await
}

/// Fetches one conversation with its full message history.
pub async fn get_conversation(id: i64) -> Result<Conversation, ApiError> {
    let resp = Request::get(&url(&format!("/chat/conversations/{id}")))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(check(resp).await?).await
}

/// Deletes a conversation and everything attached to it.
pub async fn delete_conversation(id: i64) -> Result<(), ApiError> {
    let resp = Request::delete(&url(&format!("/chat/conversations/{id}")))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check(resp).await?;
    Ok(())
}

/// Creates an empty conversation server-side and returns it.
pub async fn create_conversation() -> Result<Conversation, ApiError> {
    let resp = Request::post(&url("/chat/conversations"))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(check(resp).await?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_joins_origin_and_relative_path() {
        let image = ImageInfo {
            id: 1,
            file_path: "uploads/abc123.png".into(),
            file_name: "cat.png".into(),
            mime_type: "image/png".into(),
            file_size: None,
            created_at: "2025-03-14T09:00:00".into(),
        };
        let url = image_url(&image);
        assert!(url.ends_with("/uploads/abc123.png"));
        assert!(url.starts_with("http"));
    }
}
