//! Conversions from external infrastructure errors into domain errors.

use dataverse_domain::DataverseError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DataverseError);

impl From<InfraError> for DataverseError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DataverseError> for InfraError {
    fn from(value: DataverseError) -> Self {
        InfraError(value)
    }
}

trait IntoDataverseError {
    fn into_dataverse(self) -> DataverseError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DataverseError */
/* -------------------------------------------------------------------------- */

impl IntoDataverseError for HttpError {
    fn into_dataverse(self) -> DataverseError {
        let target = self.url().map(|url| url.to_string()).unwrap_or_else(|| "<unknown>".into());

        if self.is_builder() {
            return DataverseError::Configuration(format!("invalid HTTP request: {self}"));
        }

        if self.is_timeout() {
            return DataverseError::Transport(format!("HTTP request to {target} timed out"));
        }

        if self.is_connect() {
            return DataverseError::Transport(format!("HTTP connection failure for {target}: {self}"));
        }

        if self.is_body() || self.is_decode() {
            return DataverseError::Transport(format!(
                "failed to read HTTP response body from {target}: {self}"
            ));
        }

        DataverseError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_dataverse())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → DataverseError */
/* -------------------------------------------------------------------------- */

impl IntoDataverseError for serde_json::Error {
    fn into_dataverse(self) -> DataverseError {
        DataverseError::InvalidArgument(format!("request body could not be serialized: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_dataverse())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → DataverseError */
/* -------------------------------------------------------------------------- */

impl IntoDataverseError for std::io::Error {
    fn into_dataverse(self) -> DataverseError {
        if self.kind() == std::io::ErrorKind::Interrupted {
            return DataverseError::Interrupted;
        }
        DataverseError::Io(self.to_string())
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_dataverse())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → DataverseError */
/* -------------------------------------------------------------------------- */

impl IntoDataverseError for url::ParseError {
    fn into_dataverse(self) -> DataverseError {
        DataverseError::Configuration(format!("invalid URL: {self}"))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(value.into_dataverse())
    }
}

/// Shorthand for `map_err` chains: `.map_err(to_domain)?`.
pub fn to_domain<E>(err: E) -> DataverseError
where
    InfraError: From<E>,
{
    InfraError::from(err).into()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn connection_refused_maps_to_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}/api/info/version")).send().unwrap_err();

        match to_domain(error) {
            DataverseError::Transport(msg) => assert!(msg.contains("connection")),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_url_maps_to_configuration_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        assert!(matches!(to_domain(err), DataverseError::Configuration(_)));
    }

    #[test]
    fn io_errors_keep_interruption() {
        let interrupted = std::io::Error::new(std::io::ErrorKind::Interrupted, "signal");
        assert!(matches!(to_domain(interrupted), DataverseError::Interrupted));

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert!(matches!(to_domain(missing), DataverseError::Io(_)));
    }
}
