//! Upstream response classification.
//!
//! Maps the rendering service's HTTP response to either the lazy,
//! unconsumed byte stream of the rendered image or a typed failure. Both
//! outcomes are terminal; there is no retry here.

use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use tracing::warn;

use crate::error::GifError;

/// Lazily streamed image bytes.
///
/// Single-consumer: drain it exactly once. Dropping it without draining
/// releases the underlying connection (the transport's contract).
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, GifError>> + Send>>;

/// Classify an upstream response.
///
/// Status 200 succeeds with the response's byte stream, unconsumed and left
/// for the caller to drain. Any other status logs the operation and status
/// code, then fails with [`GifError::UpstreamStatus`]; the body is not read.
pub fn into_stream(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<ByteStream, GifError> {
    let status = response.status();
    if status == reqwest::StatusCode::OK {
        Ok(Box::pin(response.bytes_stream().map_err(GifError::from)))
    } else {
        warn!(
            operation,
            status = status.as_u16(),
            "upstream render request failed"
        );
        Err(GifError::UpstreamStatus {
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::upstream_response;
    use futures::StreamExt;

    async fn drain(mut stream: ByteStream) -> Vec<u8> {
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            bytes.extend_from_slice(&chunk.unwrap());
        }
        bytes
    }

    #[tokio::test]
    async fn ok_yields_unconsumed_stream() {
        let response = upstream_response(200, b"GIF89a...".to_vec());
        let stream = into_stream("game.gif", response).unwrap();
        assert_eq!(drain(stream).await, b"GIF89a...");
    }

    #[tokio::test]
    async fn non_ok_fails_with_status() {
        let response = upstream_response(503, b"should never be read".to_vec());
        let err = into_stream("game.gif", response).map(|_| ()).unwrap_err();
        assert!(matches!(err, GifError::UpstreamStatus { status: 503 }));
    }

    #[tokio::test]
    async fn not_found_fails_with_status() {
        let response = upstream_response(404, Vec::new());
        let err = into_stream("image.gif", response).map(|_| ()).unwrap_err();
        assert!(matches!(err, GifError::UpstreamStatus { status: 404 }));
    }

    #[tokio::test]
    async fn empty_body_streams_empty() {
        let response = upstream_response(200, Vec::new());
        let stream = into_stream("image.gif", response).unwrap();
        assert!(drain(stream).await.is_empty());
    }
}
