use async_trait::async_trait;
use fxhash::hash64;

use crate::encoder::TextEncoder;
use crate::EmbedderError;

/// Deterministic local encoder used for tests, development, and as the
/// fallback when no remote endpoint is configured. Generates sinusoid values
/// derived from a hash of the input text, so identical text always yields an
/// identical vector at minimal CPU cost.
pub(crate) struct StubEncoder {
    dimension: usize,
}

impl StubEncoder {
    pub(crate) fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn encode_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dimension];
        let h = hash64(text.as_bytes());
        for (idx, value) in v.iter_mut().enumerate() {
            *value = ((h >> (idx % 32)) as f32 * 0.0001).sin();
        }
        v
    }
}

#[async_trait]
impl TextEncoder for StubEncoder {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_is_deterministic() {
        let encoder = StubEncoder::new(384);
        let a = encoder.encode(&["same text".into()]).await.unwrap();
        let b = encoder.encode(&["same text".into()]).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn different_texts_produce_different_vectors() {
        let encoder = StubEncoder::new(384);
        let vectors = encoder
            .encode(&["hello".into(), "world".into()])
            .await
            .unwrap();
        assert_ne!(vectors[0], vectors[1]);
    }

    #[tokio::test]
    async fn stub_respects_dimension() {
        for dim in [8, 384, 1024] {
            let encoder = StubEncoder::new(dim);
            let vectors = encoder.encode(&["test".into()]).await.unwrap();
            assert_eq!(vectors[0].len(), dim);
        }
    }

    #[tokio::test]
    async fn stub_values_in_sine_range() {
        let encoder = StubEncoder::new(64);
        let vectors = encoder.encode(&["range check".into()]).await.unwrap();
        for &val in &vectors[0] {
            assert!((-1.0..=1.0).contains(&val));
        }
    }

    #[tokio::test]
    async fn empty_text_still_encodes() {
        let encoder = StubEncoder::new(384);
        let vectors = encoder.encode(&["".into()]).await.unwrap();
        assert_eq!(vectors[0].len(), 384);
        assert!(!vectors[0].iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn unicode_text_encodes() {
        let encoder = StubEncoder::new(384);
        let vectors = encoder.encode(&["Hello 世界 🌍".into()]).await.unwrap();
        assert!(!vectors[0].iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let encoder = StubEncoder::new(384);
        let vectors = encoder.encode(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }
}
