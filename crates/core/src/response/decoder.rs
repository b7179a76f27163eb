//! Envelope decoder
//!
//! Pure functions over a response body. Every failure becomes a
//! [`DecodeError`]; nothing is defaulted.

use dataverse_domain::{DecodeError, Envelope, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::shape::{short_type_name, Shape};

/// Decode `{status, message?, data}` with a payload of shape `S`.
///
/// # Errors
/// Returns `DataverseError::Decode` when the body is not valid JSON or does
/// not match the envelope/payload shape.
pub fn decode_envelope<S, M>(body: &str) -> Result<Envelope<S::Output, M>>
where
    S: Shape,
    M: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|err| {
        DecodeError::from_json(
            format!("envelope of {} with {} message", S::describe(), short_type_name::<M>()),
            &err,
        )
        .into()
    })
}

/// Decode an envelope and return only its `data` payload.
///
/// # Errors
/// Returns `DataverseError::Decode` on malformed input, or when the envelope
/// carries no `data`.
pub fn decode_data<S, M>(body: &str) -> Result<S::Output>
where
    S: Shape,
    M: DeserializeOwned,
{
    let envelope = decode_envelope::<S, M>(body)?;
    let status = envelope.status;
    envelope.data.ok_or_else(|| {
        DecodeError {
            expected: format!("envelope of {}", S::describe()),
            message: format!("envelope with status {status:?} has no data"),
            line: 0,
            column: 0,
        }
        .into()
    })
}

/// Decode a body that is not wrapped in an envelope.
///
/// # Errors
/// Returns `DataverseError::Decode` on malformed input or shape mismatch.
pub fn decode_bare<S: Shape>(body: &str) -> Result<S::Output> {
    serde_json::from_str(body)
        .map_err(|err| DecodeError::from_json(S::describe(), &err).into())
}

/// Parse the body as a generic JSON tree.
///
/// # Errors
/// Returns `DataverseError::Decode` when the body is not valid JSON.
pub fn decode_json(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|err| DecodeError::from_json("JSON value", &err).into())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use dataverse_domain::{
        DatasetPublicationResult, DataverseError, EnvelopeMessage, EnvelopeStatus, Lock,
    };

    use super::*;
    use crate::response::shape::{ListOf, MapOf, Plain};

    #[test]
    fn decodes_plain_payload() {
        let body = r#"{"status":"OK","data":{"lockType":"Ingest","user":"dataverseAdmin"}}"#;
        let lock = decode_data::<Plain<Lock>, EnvelopeMessage>(body).expect("lock");

        let mut expected = Lock::new("Ingest");
        expected.user = Some("dataverseAdmin".into());
        assert_eq!(lock, expected);
    }

    #[test]
    fn decodes_container_payloads() {
        let body = r#"{"status":"OK","data":[{"lockType":"Ingest"},{"lockType":"Workflow"}]}"#;
        let locks = decode_data::<ListOf<Lock>, EnvelopeMessage>(body).expect("locks");
        assert_eq!(locks, vec![Lock::new("Ingest"), Lock::new("Workflow")]);

        let body = r#"{"status":"OK","data":{"a":1,"b":2}}"#;
        let sizes = decode_data::<MapOf<u64>, EnvelopeMessage>(body).expect("map");
        assert_eq!(sizes, HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)]));
    }

    #[test]
    fn envelope_exposes_status_and_message() {
        let body = r#"{"status":"OK","message":"Dataset locked","data":[]}"#;
        let envelope = decode_envelope::<ListOf<Lock>, String>(body).expect("envelope");
        assert_eq!(envelope.status, EnvelopeStatus::Ok);
        assert_eq!(envelope.message.as_deref(), Some("Dataset locked"));
        assert!(envelope.data.expect("data").is_empty());
    }

    #[test]
    fn workflow_in_progress_envelope_yields_data() {
        let body = r#"{"status":"WORKFLOW_IN_PROGRESS","data":{"id":7,"identifier":"FK2/WF","protocol":"doi"}}"#;
        let published =
            decode_data::<Plain<DatasetPublicationResult>, EnvelopeMessage>(body).expect("data");
        assert_eq!(published.id, Some(7));
        assert_eq!(published.identifier.as_deref(), Some("FK2/WF"));

        let envelope =
            decode_envelope::<Plain<DatasetPublicationResult>, EnvelopeMessage>(body).expect("envelope");
        assert_eq!(envelope.status, EnvelopeStatus::WorkflowInProgress);
    }

    #[test]
    fn bare_body_needs_no_envelope() {
        let body = r#"[{"lockType":"InReview"}]"#;
        let locks = decode_bare::<ListOf<Lock>>(body).expect("locks");
        assert_eq!(locks[0].lock_type, "InReview");
    }

    #[test]
    fn malformed_input_is_a_decode_error() {
        let inputs = [
            "",
            "{",
            "not json",
            r#"{"status":"OK","data":{"lockType":42}}"#,
            r#"{"data":{"lockType":"Ingest"}}"#,
        ];
        for input in inputs {
            let result = decode_data::<Plain<Lock>, EnvelopeMessage>(input);
            assert!(
                matches!(result, Err(DataverseError::Decode(_))),
                "expected decode error for {input:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn decode_error_names_field_and_position() {
        let body = "{\"status\":\"OK\",\n\"data\":{\"lockType\":42}}";
        let Err(DataverseError::Decode(err)) = decode_data::<Plain<Lock>, EnvelopeMessage>(body)
        else {
            panic!("expected decode error");
        };
        assert_eq!(err.line, 2);
        assert!(err.expected.contains("Lock"));
        assert!(err.message.contains("invalid type"), "message: {}", err.message);
    }

    #[test]
    fn missing_data_is_reported() {
        let body = r#"{"status":"ERROR","message":"Dataset not found"}"#;
        let result = decode_data::<Plain<Lock>, EnvelopeMessage>(body);
        let Err(DataverseError::Decode(err)) = result else {
            panic!("expected decode error");
        };
        assert!(err.message.contains("no data"));
    }

    #[test]
    fn bare_shape_mismatch_is_a_decode_error() {
        assert!(decode_bare::<Plain<Lock>>("[]").is_err());
        assert!(decode_json("{\"a\":").is_err());
        assert_eq!(decode_json("{\"a\":1}").expect("json")["a"], 1);
    }
}
