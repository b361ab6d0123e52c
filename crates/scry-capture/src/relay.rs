//! One-shot capture relay.
//!
//! The relay sits between the session controller and the capture backend:
//! each request carries its own reply channel, so exactly one response per
//! request is structural. A failed capture is surfaced to the caller
//! immediately; the relay never retries.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use scry_core::{Result, ScryError};

use crate::source::{CaptureSource, CapturedFrame};

struct CaptureRequest {
    respond_to: oneshot::Sender<Result<CapturedFrame>>,
}

/// Spawns the relay task.
pub struct CaptureRelay;

impl CaptureRelay {
    /// Starts a relay serving requests against the given backend and returns
    /// a cloneable handle to it. The task exits when every handle is dropped.
    pub fn spawn(source: Arc<dyn CaptureSource>) -> CaptureRelayHandle {
        let (tx, mut rx) = mpsc::channel::<CaptureRequest>(8);

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let outcome = source.capture().await;
                if let Err(ref e) = outcome {
                    tracing::warn!("capture request failed: {e}");
                }
                // The caller may have gone away; nothing to do then.
                let _ = request.respond_to.send(outcome);
            }
        });

        CaptureRelayHandle { tx }
    }
}

/// Handle used to request captures from the relay.
#[derive(Clone)]
pub struct CaptureRelayHandle {
    tx: mpsc::Sender<CaptureRequest>,
}

impl CaptureRelayHandle {
    /// Requests one capture and waits for its single response.
    pub async fn capture(&self) -> Result<CapturedFrame> {
        let (respond_to, response) = oneshot::channel();
        self.tx
            .send(CaptureRequest { respond_to })
            .await
            .map_err(|_| ScryError::capture("capture relay is not running"))?;

        response
            .await
            .map_err(|_| ScryError::capture("no response from capture relay"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::RgbaImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        fail: bool,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn ok() -> Self {
            Self {
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CaptureSource for StubSource {
        async fn capture(&self) -> Result<CapturedFrame> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ScryError::capture("permission denied"))
            } else {
                Ok(CapturedFrame {
                    image: RgbaImage::new(800, 600),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_successful_capture_returns_frame() {
        let handle = CaptureRelay::spawn(Arc::new(StubSource::ok()));
        let frame = handle.capture().await.unwrap();
        assert_eq!((frame.width(), frame.height()), (800, 600));
    }

    #[tokio::test]
    async fn test_failed_capture_returns_error() {
        let handle = CaptureRelay::spawn(Arc::new(StubSource::failing()));
        let err = handle.capture().await.unwrap_err();
        assert_eq!(err.to_string(), "Capture failed: permission denied");
    }

    #[tokio::test]
    async fn test_each_request_gets_exactly_one_response() {
        let source = Arc::new(StubSource::ok());
        let handle = CaptureRelay::spawn(source.clone());

        handle.capture().await.unwrap();
        handle.capture().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cloned_handles_share_the_relay() {
        let source = Arc::new(StubSource::ok());
        let handle = CaptureRelay::spawn(source.clone());

        let clone = handle.clone();
        clone.capture().await.unwrap();
        drop(clone);

        // The relay keeps serving the remaining handle.
        assert!(handle.capture().await.is_ok());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
