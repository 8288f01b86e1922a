//! Request ids, taken from the caller or generated.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is kept.
const MAX_REQUEST_ID_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    /// Reuse the caller's id when it is short printable ASCII, otherwise mint
    /// a v7 uuid.
    pub(super) fn from_header(value: Option<String>) -> Self {
        value
            .map(|value| value.trim().to_owned())
            .filter(|value| {
                !value.is_empty()
                    && value.len() <= MAX_REQUEST_ID_LEN
                    && value.bytes().all(|byte| byte.is_ascii_graphic())
            })
            .map_or_else(|| Self(Uuid::now_v7().to_string()), Self)
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    pub(super) fn write_header(&self, res: &mut Response) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Err(source) => {
                warn!(request_id = %self.0, "request id is not a valid header value: {source}");
            }
        }
    }
}

/// Handlers that render nothing leave the status unset, which salvo sends as 200.
pub(super) fn final_status(res: &Response) -> StatusCode {
    res.status_code.unwrap_or(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_ids_are_kept_trimmed() {
        assert_eq!(
            RequestId::from_header(Some(" req-123 ".to_string())).as_str(),
            "req-123"
        );
    }

    #[test]
    fn unusable_ids_are_replaced() {
        for value in [
            None,
            Some("   ".to_string()),
            Some("has space".to_string()),
            Some("x".repeat(MAX_REQUEST_ID_LEN + 1)),
        ] {
            let id = RequestId::from_header(value.clone());

            assert!(
                Uuid::parse_str(id.as_str()).is_ok(),
                "expected a generated id for {value:?}, got {id:?}"
            );
        }
    }

    #[test]
    fn unset_status_is_ok() {
        let mut res = Response::new();

        assert_eq!(final_status(&res), StatusCode::OK);

        res.status_code(StatusCode::CONFLICT);

        assert_eq!(final_status(&res), StatusCode::CONFLICT);
    }
}
