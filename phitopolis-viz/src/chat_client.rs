//! Browser side of the chat endpoint

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::assistant::{ConversationReply, ConversationRequest};

/// Default path of the server's chat endpoint
pub const CHAT_ENDPOINT: &str = "/api/chat";

/// POST the request and return the reply text.
///
/// Every failure (network, HTTP status, body) comes back as `Err` with a
/// description for the console; the caller decides what the user sees.
pub async fn send(endpoint: &str, request: &ConversationRequest) -> Result<String, String> {
    let body = serde_json::to_string(request).map_err(|e| format!("encode: {e}"))?;

    let headers = Headers::new().map_err(|e| format!("{e:?}"))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_headers(&headers.into());
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(endpoint, &opts).map_err(|e| format!("{e:?}"))?;
    let resp_val = JsFuture::from(crate::dom::window().fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch error: {e:?}"))?;
    let resp: Response = resp_val
        .dyn_into()
        .map_err(|_| "not a Response".to_string())?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?
        .as_string()
        .ok_or_else(|| "not a string".to_string())?;

    let reply: ConversationReply =
        serde_json::from_str(&text).map_err(|e| format!("parse reply: {e}"))?;
    Ok(reply.text)
}
