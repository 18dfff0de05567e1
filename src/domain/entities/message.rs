//! Message entity, its wire record, and outgoing message payloads.
//!
//! Incoming messages map to the items of `messageList`; outgoing ones are
//! serialized into the body of `POST .../chat/thread/{id}/message`.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Identified, MemberRecord};
use crate::shared::error::ClientError;

/// Client reference id attached to every outgoing message.
///
/// The service expects a per-message reference, but the same value is sent
/// on every call (see `Community::with_client_ref_id`).
pub const CLIENT_REF_ID: i64 = 827027430;

/// Message type code of a plain text or image message.
pub const TEXT_MESSAGE: i64 = 0;

/// Message type code of a voice message.
pub const VOICE_MESSAGE: i64 = 2;

/// Media type code of an image upload.
pub const IMAGE_MEDIA: i64 = 100;

/// Media type code of an audio upload.
pub const AUDIO_MEDIA: i64 = 110;

/// Raw `messageList` item as sent by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageRecord {
    pub message_id: Option<String>,

    pub thread_id: Option<String>,

    pub content: Option<String>,

    #[serde(rename = "type")]
    pub message_type: Option<i64>,

    pub media_type: Option<i64>,

    pub media_value: Option<String>,

    pub client_ref_id: Option<i64>,

    pub created_time: Option<String>,

    pub author: Option<MemberRecord>,
}

impl MessageRecord {
    /// Parse a record from a raw JSON value.
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        serde_json::from_value(value)
            .map_err(|e| ClientError::schema(format!("invalid message: {}", e)))
    }
}

/// A message inside a thread.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    /// Remote message id (`messageId`)
    pub id: String,

    pub thread_id: Option<String>,

    pub content: Option<String>,

    /// Raw type code (0 = text, 2 = voice, others are system messages)
    pub message_type: Option<i64>,

    pub media_type: Option<i64>,

    /// URL of attached media
    pub media_value: Option<String>,

    pub client_ref_id: Option<i64>,

    pub created_time: Option<String>,

    /// Id of the sending member
    pub author_id: Option<String>,
}

impl Message {
    /// Build a message from a `messageList` item.
    pub fn from_record(record: &MessageRecord) -> Self {
        Self {
            id: record.message_id.clone().unwrap_or_default(),
            thread_id: record.thread_id.clone(),
            content: record.content.clone(),
            message_type: record.message_type,
            media_type: record.media_type,
            media_value: record.media_value.clone(),
            client_ref_id: record.client_ref_id,
            created_time: record.created_time.clone(),
            author_id: record.author.as_ref().and_then(|a| a.uid.clone()),
        }
    }

    /// Whether this is a voice message.
    pub fn is_voice(&self) -> bool {
        self.message_type == Some(VOICE_MESSAGE)
    }
}

impl Identified for Message {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

/// A message about to be sent to a thread.
#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingMessage {
    /// Plain text
    Text { content: String },

    /// Image upload; `extension` selects the `image/<ext>` content type
    Image { data: Vec<u8>, extension: String },

    /// Voice message upload
    Audio { data: Vec<u8> },
}

impl OutgoingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Read an image file; the file extension becomes the content subtype.
    pub fn image_from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| {
                ClientError::invalid_input(format!(
                    "image path {} has no file extension",
                    path.display()
                ))
            })?
            .to_lowercase();
        let data = std::fs::read(path)?;
        Ok(Self::Image { data, extension })
    }

    /// Read an audio file.
    pub fn audio_from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let data = std::fs::read(path.as_ref())?;
        Ok(Self::Audio { data })
    }

    /// Build the JSON request body.
    pub fn to_payload(&self, client_ref_id: i64, timestamp: i64) -> Value {
        match self {
            Self::Text { content } => json!({
                "type": TEXT_MESSAGE,
                "content": content,
                "clientRefId": client_ref_id,
                "timestamp": timestamp,
            }),
            Self::Image { data, extension } => json!({
                "type": TEXT_MESSAGE,
                "content": null,
                "clientRefId": client_ref_id,
                "timestamp": timestamp,
                "mediaType": IMAGE_MEDIA,
                "mediaUploadValue": BASE64.encode(data),
                "mediaUploadValueContentType": format!("image/{}", extension),
                "mediaUhqEnabled": false,
                "attachedObject": null,
            }),
            Self::Audio { data } => json!({
                "type": VOICE_MESSAGE,
                "content": null,
                "clientRefId": client_ref_id,
                "timestamp": timestamp,
                "mediaType": AUDIO_MEDIA,
                "mediaUploadValue": BASE64.encode(data),
                "attachedObject": null,
            }),
        }
    }
}
