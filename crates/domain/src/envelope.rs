//! The `{status, message, data}` wrapper most Dataverse responses use.

use serde::{Deserialize, Serialize};

/// Outcome reported in the envelope's `status` field.
///
/// Besides `OK` and `ERROR` the server answers a publish that starts a
/// workflow with `WORKFLOW_IN_PROGRESS` and a 2xx status. Unknown values land
/// in [`EnvelopeStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvelopeStatus {
    Ok,
    Error,
    WorkflowInProgress,
    #[serde(other)]
    Other,
}

/// A structured message, e.g. `{"message": "This file has the same content as ..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataMessage {
    pub message: String,
}

/// The `message` field of an envelope.
///
/// The server sends either a bare string or a [`DataMessage`] object depending
/// on the endpoint, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeMessage {
    Text(String),
    Detailed(DataMessage),
}

impl EnvelopeMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Detailed(detailed) => &detailed.message,
        }
    }
}

/// Response envelope carrying a payload of type `D` and a message of type `M`.
///
/// `data` is present whenever `status` is [`EnvelopeStatus::Ok`]; error
/// envelopes normally only carry a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<D, M = EnvelopeMessage> {
    pub status: EnvelopeStatus,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub message: Option<M>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<D>,
}

impl<D, M> Envelope<D, M> {
    pub fn ok(data: D) -> Self {
        Self { status: EnvelopeStatus::Ok, message: None, data: Some(data) }
    }

    pub fn is_ok(&self) -> bool {
        self.status == EnvelopeStatus::Ok
    }
}
