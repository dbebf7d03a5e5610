//! Mix feed
//!
//! Once per tick the relay snapshots the latest frame of every supplied
//! stream id and emits one `"{id}:{base64}"` record set, entries joined
//! by a single newline. A missing or undecodable frame drops that one id
//! from the tick; it never aborts the tick for the others.
//!
//! Decoding here is validation only: the relayed payload is the stored
//! base64 text, bit-for-bit. Only the single-stream feed re-encodes.

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::stream::{self, Stream};
use tokio::time::MissedTickBehavior;

use super::codec;
use super::feed::FrameRelay;

impl FrameRelay {
    /// One tick of the mix feed
    ///
    /// Entries appear in the order of `stream_ids`: the caller supplies
    /// the registry's bot-registration order and it is preserved as-is,
    /// not sorted. Ids with no valid frame are simply absent from the
    /// result; the record set carries no trailing separator.
    pub async fn mix_snapshot(&self, stream_ids: &[String]) -> String {
        let mut entries = Vec::with_capacity(stream_ids.len());

        for stream_id in stream_ids {
            let Some(payload) = self.store().get(stream_id).await else {
                continue;
            };

            match codec::decode_frame(&payload) {
                Ok(_) => {
                    entries.push(format!(
                        "{}:{}",
                        stream_id,
                        String::from_utf8_lossy(&payload)
                    ));
                }
                Err(e) => {
                    tracing::debug!(stream = %stream_id, error = %e, "Dropping stream from mix tick");
                }
            }
        }

        entries.join("\n")
    }

    /// Infinite mix stream over a fixed id list
    ///
    /// The id list is captured once here and never re-queried mid-tick;
    /// a changed roster only shows up on the next request. Emits one
    /// record-set chunk per tick at `fps` Hz until the consumer
    /// disconnects.
    pub fn mix_feed(
        self: &Arc<Self>,
        stream_ids: Vec<String>,
        fps: u32,
    ) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
        let relay = Arc::clone(self);
        let period = std::time::Duration::from_secs_f64(1.0 / fps.max(1) as f64);

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(streams = stream_ids.len(), fps = fps, "Mix feed started");

        stream::unfold(
            (relay, stream_ids, ticker),
            |(relay, stream_ids, mut ticker)| async move {
                ticker.tick().await;
                let chunk = relay.mix_snapshot(&stream_ids).await;
                Some((
                    Ok::<_, Infallible>(Bytes::from(chunk)),
                    (relay, stream_ids, ticker),
                ))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use image::codecs::jpeg::JpegEncoder;
    use image::{DynamicImage, ImageBuffer, Rgb};

    use crate::store::FrameStore;

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

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_mix_skips_missing_ids_and_keeps_order() {
        let relay = relay();
        let (a, c) = (jpeg_base64(10, 10), jpeg_base64(12, 12));
        relay.store().put("botA", a.clone()).await;
        relay.store().put("botC", c.clone()).await;

        let mix = relay.mix_snapshot(&ids(&["botA", "botB", "botC"])).await;

        assert_eq!(mix, format!("botA:{}\nbotC:{}", a, c));
        assert!(!mix.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_mix_single_entry_has_no_separator() {
        let relay = relay();
        let a = jpeg_base64(10, 10);
        relay.store().put("botA", a.clone()).await;

        let mix = relay.mix_snapshot(&ids(&["botA", "botB"])).await;

        assert_eq!(mix, format!("botA:{}", a));
    }

    #[tokio::test]
    async fn test_mix_decode_failure_drops_only_that_id() {
        let relay = relay();
        let (a, c) = (jpeg_base64(10, 10), jpeg_base64(10, 10));
        relay.store().put("botA", a.clone()).await;
        relay.store().put("botB", "definitely not a frame").await;
        relay.store().put("botC", c.clone()).await;

        let mix = relay.mix_snapshot(&ids(&["botA", "botB", "botC"])).await;

        assert_eq!(mix, format!("botA:{}\nbotC:{}", a, c));
    }

    #[tokio::test]
    async fn test_mix_empty_roster_emits_empty_set() {
        let relay = relay();

        assert_eq!(relay.mix_snapshot(&[]).await, "");
        assert_eq!(relay.mix_snapshot(&ids(&["botA"])).await, "");
    }

    #[tokio::test]
    async fn test_mix_relays_stored_base64_untouched() {
        // The mix feed must not re-encode: the emitted payload is the
        // exact stored text, whatever resolution it encodes.
        let relay = relay();
        let original = jpeg_base64(640, 480);
        relay.store().put("botA", original.clone()).await;

        let mix = relay.mix_snapshot(&ids(&["botA"])).await;

        assert_eq!(mix, format!("botA:{}", original));
    }
}
