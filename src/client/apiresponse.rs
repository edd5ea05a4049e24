use serde::Deserialize;

use crate::client::clienterror::ApiError;
use crate::holiday::holiday::Holiday;

const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Deserialize)]
struct SuccessEnvelope {
    result: bool,
    data: Vec<Holiday>
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    result: bool,
    error: ErrorBody
}

/// Decodes a `{result, data}` / `{result: false, error: {message}}` envelope.
///
/// A body in neither shape is reported by status when the status is not a
/// success, and as an invalid response otherwise.
pub fn parse_envelope(status: u16, body: &str) -> Result<Vec<Holiday>, ApiError> {
    let json_value: serde_json::Value = serde_json::from_str(body)
        .map_err(|error| ApiError::invalid_response(format!("Invalid JSON response: {error}")))?;

    if let Ok(success) = serde_json::from_value::<SuccessEnvelope>(json_value.clone()) {
        if success.result {
            return Ok(success.data);
        }
    }

    if let Ok(failure) = serde_json::from_value::<ErrorEnvelope>(json_value) {
        if !failure.result {
            let message = failure.error.message.unwrap_or_else(|| "Unknown error".to_owned());
            return Err(ApiError::from_status(status, message));
        }
    }

    if !(200..300).contains(&status) {
        let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        return Err(ApiError::from_status(status, format!("HTTP {status}: {excerpt}")));
    }

    Err(ApiError::invalid_response("Response does not match expected format"))
}
