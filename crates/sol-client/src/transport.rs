//! The seam between the client and whatever moves bytes over the network.

use crate::error::ClientError;

/// Sends one JSON-RPC request body to `url` and returns the response body.
///
/// Implementations own connection handling, timeouts and retries; the
/// client only builds requests and reads responses.
pub trait Transport {
    fn post(&self, url: &str, body: &str) -> Result<String, ClientError>;
}

impl<F> Transport for F
where
    F: Fn(&str, &str) -> Result<String, ClientError>,
{
    fn post(&self, url: &str, body: &str) -> Result<String, ClientError> {
        self(url, body)
    }
}
