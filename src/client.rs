//! Posting a selection to its prediction endpoint and decoding the answer.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::PredictError;
use crate::transport::{status_reason, HttpResponse, Transport};
use crate::Prediction;

/// One request per call; no retries and no client-side timeout.
#[derive(Clone)]
pub struct PredictionClient<T> {
    transport: T,
    config: AppConfig,
}

impl<T: Transport> PredictionClient<T> {
    pub fn new(transport: T, config: AppConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn predict<P: Prediction>(
        &self,
        selection: &P::Selection,
    ) -> Result<P::Response, PredictError> {
        let url = self.config.endpoint(P::KIND)?;
        let body = encode_body(&P::to_request(selection))?;

        let resp = self
            .transport
            .post_json(&url, &body)
            .await
            .map_err(|e| PredictError::Network(e.to_string()))?;

        if !resp.is_success() {
            let err = server_error(&resp);
            warn!("{} request failed: {}", P::KIND, err);
            return Err(err);
        }

        let decoded = decode_response::<P>(&resp.body)?;
        debug!("{} response: {:?}", P::KIND, decoded);
        Ok(decoded)
    }
}

/// Serialise a request body to JSON.
pub fn encode_body<S: Serialize>(request: &S) -> Result<serde_json::Value, PredictError> {
    serde_json::to_value(request).map_err(|e| PredictError::Encode(e.to_string()))
}

/// Decode and check a response body against the endpoint's schema.
pub fn decode_response<P: Prediction>(body: &str) -> Result<P::Response, PredictError> {
    let response: P::Response =
        serde_json::from_str(body).map_err(|e| PredictError::Decode(e.to_string()))?;
    P::check_response(&response).map_err(PredictError::Decode)?;
    Ok(response)
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Build a [`PredictError::Server`], preferring a JSON `detail` message, then
/// the raw body, then the status reason phrase.
pub fn server_error(resp: &HttpResponse) -> PredictError {
    let message = match serde_json::from_str::<ErrorBody>(&resp.body) {
        Ok(err) => err.detail,
        Err(_) => resp.body.trim().to_string(),
    };
    let message = if message.is_empty() {
        status_reason(resp.status).unwrap_or("Unknown status").to_string()
    } else {
        message
    };
    PredictError::Server {
        status: resp.status,
        message,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn unencodable_request_is_encode_error() {
        let mut request = HashMap::new();
        request.insert((1u8, 2u8), 3u8);
        let err = encode_body(&request).unwrap_err();
        assert!(matches!(err, PredictError::Encode(_)), "{:?}", err);
        assert!(err.to_string().starts_with("Could not encode request: "));
    }

    #[test]
    fn server_error_prefers_detail() {
        let resp = HttpResponse::new(422, r#"{"detail": "unknown bowler"}"#);
        assert_eq!(
            server_error(&resp),
            PredictError::Server {
                status: 422,
                message: "unknown bowler".into()
            }
        );
    }

    #[test]
    fn server_error_falls_back_to_body_then_reason() {
        let resp = HttpResponse::new(502, "  upstream down \n");
        assert_eq!(
            server_error(&resp).to_string(),
            "Server error: 502 - upstream down"
        );

        let resp = HttpResponse::new(503, "");
        assert_eq!(
            server_error(&resp).to_string(),
            "Server error: 503 - Service Unavailable"
        );
    }
}
