//! Single-stream feed
//!
//! A long-lived, server-driven pull loop: on each tick the relay reads
//! the latest stored payload for one stream id, normalizes it to the
//! configured output width and emits it as one part of a multipart
//! `image/jpeg` stream. Ticks with no frame or an undecodable frame are
//! skipped; the consumer keeps the previous frame on screen and the loop
//! keeps polling.

use std::convert::Infallible;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, Stream};
use tokio::time::MissedTickBehavior;

use crate::store::FrameStore;

use super::codec;
use super::config::RelayConfig;
use super::error::FeedError;

/// Relay from the frame store to live feeds
///
/// Holds the shared store and the output tuning. One relay serves any
/// number of concurrent feeds; each feed is its own polling task and
/// none blocks another.
pub struct FrameRelay {
    store: Arc<FrameStore>,
    config: RelayConfig,
}

impl FrameRelay {
    /// Create a relay over the given store with default tuning
    pub fn new(store: Arc<FrameStore>) -> Self {
        Self::with_config(store, RelayConfig::default())
    }

    /// Create a relay with custom tuning
    pub fn with_config(store: Arc<FrameStore>, config: RelayConfig) -> Self {
        Self { store, config }
    }

    /// Get the relay configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Get the underlying frame store
    pub fn store(&self) -> &Arc<FrameStore> {
        &self.store
    }

    /// One tick of the single-stream feed
    ///
    /// Reads the latest payload for `stream_id`, decodes it, re-encodes
    /// at the configured width and wraps it as one multipart part. The
    /// error tells the caller why nothing was produced; the feed loop
    /// turns every variant into a skipped tick.
    pub async fn next_part(&self, stream_id: &str) -> Result<Bytes, FeedError> {
        let payload = self
            .store
            .get(stream_id)
            .await
            .ok_or(FeedError::MissingFrame)?;

        let frame = codec::decode_frame(&payload)?;
        let jpeg = codec::encode_normalized(&frame, self.config.target_width, self.config.jpeg_quality)?;

        let mut part = BytesMut::with_capacity(jpeg.len() + self.config.boundary.len() + 40);
        part.extend_from_slice(b"--");
        part.extend_from_slice(self.config.boundary.as_bytes());
        part.extend_from_slice(b"\r\nContent-Type: image/jpeg\r\n\r\n");
        part.extend_from_slice(&jpeg);
        part.extend_from_slice(b"\r\n");
        Ok(part.freeze())
    }

    /// Infinite multipart stream for one bot's feed
    ///
    /// Emits one part per tick at `freq` Hz, skipping ticks with nothing
    /// to show. The stream never ends on its own: dropping it (the
    /// consumer disconnecting) cancels the loop at its next suspension
    /// point, and a new request starts a fresh loop.
    pub fn stream_feed(
        self: &Arc<Self>,
        stream_id: String,
        freq: u32,
    ) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
        let relay = Arc::clone(self);
        let period = std::time::Duration::from_secs_f64(1.0 / freq.max(1) as f64);

        // Sleep first, then read: the first part goes out one period in.
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(stream = %stream_id, freq = freq, "Feed started");

        stream::unfold(
            (relay, stream_id, ticker),
            |(relay, stream_id, mut ticker)| async move {
                loop {
                    ticker.tick().await;
                    match relay.next_part(&stream_id).await {
                        Ok(part) => {
                            return Some((Ok::<_, Infallible>(part), (relay, stream_id, ticker)))
                        }
                        Err(FeedError::MissingFrame) => {}
                        Err(e) => {
                            tracing::debug!(stream = %stream_id, error = %e, "Skipping feed tick");
                        }
                    }
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use image::codecs::jpeg::JpegEncoder;
    use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb};
    use tokio_test::assert_ok;

    use super::*;

    fn jpeg_base64(width: u32, height: u32) -> String {
        let img = ImageBuffer::from_pixel(width, height, Rgb([255u8, 0, 0]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 90))
            .expect("encode fixture");
        BASE64.encode(buf.into_inner())
    }

    fn relay() -> Arc<FrameRelay> {
        Arc::new(FrameRelay::new(Arc::new(FrameStore::new())))
    }

    /// Strip the multipart framing and return the JPEG body
    fn part_body(part: &[u8]) -> &[u8] {
        let head = b"--frame\r\nContent-Type: image/jpeg\r\n\r\n";
        assert!(part.starts_with(head), "part framing mismatch");
        assert!(part.ends_with(b"\r\n"));
        &part[head.len()..part.len() - 2]
    }

    #[tokio::test]
    async fn test_next_part_missing_frame() {
        let relay = relay();

        let err = relay.next_part("botA").await.unwrap_err();
        assert!(matches!(err, FeedError::MissingFrame));
    }

    #[tokio::test]
    async fn test_next_part_emits_normalized_jpeg() {
        let relay = relay();
        relay.store().put("botA", jpeg_base64(100, 50)).await;

        let part = relay.next_part("botA").await.expect("one part");
        let jpeg = part_body(&part);
        let out = image::load_from_memory(jpeg).expect("body is a valid jpeg");

        assert_eq!(out.dimensions().0, relay.config().target_width);
    }

    #[tokio::test]
    async fn test_next_part_skips_corrupt_payload() {
        let relay = relay();
        relay.store().put("botA", "@@not base64@@").await;

        let err = relay.next_part("botA").await.unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[tokio::test]
    async fn test_feed_emits_once_published() {
        let relay = relay();

        // Nothing published yet: ticks produce nothing
        for _ in 0..5 {
            assert!(relay.next_part("botA").await.is_err());
        }

        // Publish, then the next tick emits exactly one part
        relay.store().put("botA", jpeg_base64(20, 20)).await;
        let part = tokio_test::assert_ok!(relay.next_part("botA").await);
        assert!(!part.is_empty());
    }

    #[tokio::test]
    async fn test_feed_recovers_after_corruption() {
        let relay = relay();

        relay.store().put("botA", "garbage").await;
        assert!(relay.next_part("botA").await.is_err());

        // A good frame overwrites the bad one; the next tick emits again
        relay.store().put("botA", jpeg_base64(20, 20)).await;
        assert!(relay.next_part("botA").await.is_ok());
    }
}
