use crate::domain::entities::{Attachment, HttpFailure, Outcome, Response};
use crate::domain::value_objects::{ContentDisposition, OCTET_STREAM_MEDIA_TYPE, media_type};
use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const INDENT: &[u8] = b"    ";

/// Turns a response into an [`Outcome`] by inspecting status and headers once
pub struct ResponseDispatcher;

impl ResponseDispatcher {
    pub fn dispatch(response: Response) -> Outcome {
        if !response.status.is_success() {
            return Outcome::Failure(HttpFailure {
                status: response.status.as_u16(),
                reason: response.reason,
            });
        }

        let is_attachment = response
            .header("content-type")
            .is_some_and(|ct| media_type(ct) == OCTET_STREAM_MEDIA_TYPE);

        if is_attachment {
            let filename =
                ContentDisposition::new(response.header("content-disposition")).filename();
            tracing::debug!(%filename, "response is an attachment");
            return Outcome::Attachment(Attachment {
                filename,
                body: response.body,
            });
        }

        Outcome::Text(render_text(&response.body))
    }
}

/// Canonical JSON when the body parses, the raw text otherwise
pub fn render_text(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| canonical_json(&json).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

/// Key-sorted JSON indented by four spaces, non-ASCII left as is
pub fn canonical_json(value: &Value) -> Result<String> {
    let sorted = sort_keys(value.clone());
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    sorted
        .serialize(&mut serializer)
        .map_err(|e| anyhow!("Failed to format JSON: {}", e))?;
    String::from_utf8(out).map_err(|e| anyhow!("Formatted JSON is not UTF-8: {}", e))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            Value::Object(sorted.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
