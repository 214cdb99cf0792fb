use crate::bounded::{BoxError, BoxStream, Send, Sync};
use crate::http::{Response, StatusCode};
use crate::reject::{self, Reject};

use std::error::Error as StdError;
use std::future::poll_fn;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::{fmt, mem};

use bytes::Bytes;
use futures_core::Stream;

/// Respresents the body of an HTTP message.
pub struct Body {
    kind: BodyKind,
}

enum BodyKind {
    Stream(BoxStream<'static, Result<Bytes, BoxError>>),
    Once(Bytes),
    Empty,
}

impl Body {
    /// Create a `Body` from a stream of bytes.
    pub fn stream<S, E>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + Sync + 'static,
        E: StdError + Send + Sync + 'static,
    {
        pin_project_lite::pin_project! {
            struct MapErr<S> {
                #[pin]
                inner: S,
            }
        }

        impl<T, E, S> Stream for MapErr<S>
        where
            E: StdError + Send + Sync + 'static,
            S: Stream<Item = Result<T, E>>,
        {
            type Item = Result<T, BoxError>;

            fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
                self.project()
                    .inner
                    .poll_next(cx)
                    .map(|item| item.map(|res| res.map_err(|err| Box::new(err) as _)))
            }
        }

        Body {
            kind: BodyKind::Stream(Box::pin(MapErr { inner: stream })),
        }
    }

    /// Create a body directly from bytes.
    pub fn once(bytes: impl Into<Bytes>) -> Self {
        Body {
            kind: BodyKind::Once(bytes.into()),
        }
    }

    /// Create an empty `Body`.
    pub fn empty() -> Self {
        Body {
            kind: BodyKind::Empty,
        }
    }

    /// Returns the next chunk of the body, if any.
    pub async fn chunk(&mut self) -> Option<Result<Bytes, BoxError>> {
        poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }

    /// Read the whole body into memory.
    ///
    /// Fails with [`BytesRejection`] once more than `limit` bytes
    /// have been streamed.
    pub async fn bytes(&mut self, limit: usize) -> Result<Bytes, BytesRejection> {
        if let BodyKind::Once(ref bytes) = self.kind {
            if bytes.len() > limit {
                return Err(BytesRejection::ExceededLimit(limit));
            }
        }

        let mut buf = Vec::new();

        while let Some(chunk) = self.chunk().await {
            let chunk = chunk.map_err(BytesRejection::Io)?;

            if buf.len() + chunk.len() > limit {
                return Err(BytesRejection::ExceededLimit(limit));
            }

            buf.extend_from_slice(&chunk);
        }

        Ok(Bytes::from(buf))
    }
}

impl Stream for Body {
    type Item = Result<Bytes, BoxError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match &mut self.kind {
            BodyKind::Stream(stream) => stream.as_mut().poll_next(cx),
            BodyKind::Once(bytes) => {
                let bytes = mem::take(bytes);
                self.kind = BodyKind::Empty;
                Poll::Ready(Some(Ok(bytes)))
            }
            BodyKind::Empty => Poll::Ready(None),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.kind {
            BodyKind::Stream(stream) => stream.size_hint(),
            BodyKind::Once(bytes) => (bytes.len(), Some(bytes.len())),
            BodyKind::Empty => (0, Some(0)),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish()
    }
}

impl From<String> for Body {
    fn from(string: String) -> Self {
        Body::once(string)
    }
}

impl From<&'static str> for Body {
    fn from(str: &'static str) -> Self {
        Body::once(str)
    }
}

/// Error returned by [`Body::bytes`].
///
/// This type will reject the request with `400 Bad Request` if an
/// error occurs while reading the body, and `413 Payload Too Large`
/// if the body size exceeds the configured limit.
#[derive(Debug, thiserror::Error)]
pub enum BytesRejection {
    /// The underlying transport failed.
    #[error("failed to read request body: {0}")]
    Io(BoxError),
    /// The body was larger than the configured limit.
    #[error("request body larger than {0} bytes")]
    ExceededLimit(usize),
}

impl Reject for BytesRejection {
    fn reject(self) -> Response {
        let status = match self {
            BytesRejection::Io(_) => StatusCode::BAD_REQUEST,
            BytesRejection::ExceededLimit(_) => StatusCode::PAYLOAD_TOO_LARGE,
        };

        reject::error_response(status, &self)
    }
}
