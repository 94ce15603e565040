use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::encoder::{build_encoder, TextEncoder};
use crate::normalize::l2_normalize_in_place;
use crate::{EmbedderConfig, EmbedderError};

/// Text encoded once at load time to discover the model dimension.
const DIMENSION_PROBE: &str = "dimension probe";

/// Owns the single process-wide model instance.
///
/// The first caller of [`get`](Self::get) pays the load cost while
/// concurrent callers wait on the same in-flight initialization; everyone
/// after that reuses the cached [`ModelHandle`]. A failed load caches
/// nothing, so a later call retries from scratch.
pub struct ModelRegistry {
    cfg: EmbedderConfig,
    cell: OnceCell<Arc<ModelHandle>>,
    loads: AtomicUsize,
}

impl ModelRegistry {
    pub fn new(cfg: EmbedderConfig) -> Self {
        Self {
            cfg,
            cell: OnceCell::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Return the shared model handle, loading it on first use.
    pub async fn get(&self) -> Result<Arc<ModelHandle>, EmbedderError> {
        self.cell
            .get_or_try_init(|| async {
                self.loads.fetch_add(1, Ordering::Relaxed);
                let handle = ModelHandle::load(&self.cfg).await?;
                tracing::info!(
                    model = %handle.name(),
                    dimension = handle.dimension(),
                    "model loaded"
                );
                Ok(Arc::new(handle))
            })
            .await
            .cloned()
    }

    /// Number of load attempts so far. Stays at 1 for the whole process
    /// lifetime once a load succeeds.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

/// A loaded model: write-once, read-many. All requests in the process see
/// the same identity and dimension.
pub struct ModelHandle {
    name: String,
    dimension: usize,
    normalize: bool,
    encoder: Box<dyn TextEncoder>,
}

impl ModelHandle {
    async fn load(cfg: &EmbedderConfig) -> Result<Self, EmbedderError> {
        let encoder = build_encoder(cfg)?;

        // Probe once so health checks can report the dimension without
        // triggering inference later.
        let mut probe = encoder
            .encode(&[DIMENSION_PROBE.to_string()])
            .await
            .map_err(|e| EmbedderError::ModelLoad(e.to_string()))?;
        let dimension = probe
            .pop()
            .filter(|v| !v.is_empty())
            .map(|v| v.len())
            .ok_or_else(|| {
                EmbedderError::ModelLoad("model produced an empty probe vector".into())
            })?;

        Ok(Self {
            name: cfg.model_name.clone(),
            dimension,
            normalize: cfg.normalize,
            encoder,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Encode a single text.
    pub async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        let mut vectors = self.encode_batch(&[text.to_string()], 1).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbedderError::Inference("model returned no outputs".into()))
    }

    /// Encode many texts, chunking by `batch_size`.
    ///
    /// Chunking is a throughput hint only: the output always holds one
    /// vector per input text, in input order, whatever the chunk size.
    pub async fn encode_batch(
        &self,
        texts: &[String],
        batch_size: usize,
    ) -> Result<Vec<Vec<f32>>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(batch_size.max(1)) {
            let mut batch = self.encoder.encode(chunk).await?;
            if batch.len() != chunk.len() {
                return Err(EmbedderError::Inference(format!(
                    "model returned {} embeddings for {} inputs",
                    batch.len(),
                    chunk.len()
                )));
            }
            if self.normalize {
                for vector in &mut batch {
                    l2_normalize_in_place(vector);
                }
            }
            vectors.extend(batch);
        }

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_config() -> EmbedderConfig {
        EmbedderConfig {
            mode: "stub".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn get_loads_once_and_reuses_handle() {
        let registry = ModelRegistry::new(stub_config());
        let first = registry.get().await.unwrap();
        let second = registry.get().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.load_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_cold_start_loads_exactly_once() {
        let registry = Arc::new(ModelRegistry::new(stub_config()));

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            tasks.push(tokio::spawn(async move {
                registry.get().await.map(|h| h.dimension())
            }));
        }

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), 384);
        }
        assert_eq!(registry.load_count(), 1);
    }

    #[tokio::test]
    async fn failed_load_caches_nothing_and_retries() {
        // "http://" is not a valid request URL, so the probe fails without
        // touching the network.
        let registry = ModelRegistry::new(EmbedderConfig {
            mode: "api".into(),
            api_url: Some("http://".into()),
            ..Default::default()
        });

        assert!(matches!(
            registry.get().await,
            Err(EmbedderError::ModelLoad(_))
        ));
        assert!(registry.get().await.is_err());
        assert_eq!(registry.load_count(), 2);
    }

    #[tokio::test]
    async fn encode_returns_vector_of_model_dimension() {
        let registry = ModelRegistry::new(stub_config());
        let model = registry.get().await.unwrap();
        let vector = model.encode("hello world").await.unwrap();
        assert_eq!(vector.len(), model.dimension());
    }

    #[tokio::test]
    async fn encode_is_idempotent() {
        let registry = ModelRegistry::new(stub_config());
        let model = registry.get().await.unwrap();
        let a = model.encode("identical input").await.unwrap();
        let b = model.encode("identical input").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn batch_size_does_not_change_output() {
        let registry = ModelRegistry::new(stub_config());
        let model = registry.get().await.unwrap();
        let texts: Vec<String> = (0..5).map(|i| format!("text number {i}")).collect();

        let chunked = model.encode_batch(&texts, 2).await.unwrap();
        let whole = model.encode_batch(&texts, 32).await.unwrap();

        assert_eq!(chunked.len(), texts.len());
        assert_eq!(chunked, whole);
    }

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let registry = ModelRegistry::new(stub_config());
        let model = registry.get().await.unwrap();
        let texts = vec!["first".to_string(), "second".to_string(), "third".to_string()];

        let batch = model.encode_batch(&texts, 32).await.unwrap();
        for (text, vector) in texts.iter().zip(&batch) {
            assert_eq!(vector, &model.encode(text).await.unwrap());
        }
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_output() {
        let registry = ModelRegistry::new(stub_config());
        let model = registry.get().await.unwrap();
        assert!(model.encode_batch(&[], 32).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn normalize_flag_yields_unit_vectors() {
        let registry = ModelRegistry::new(EmbedderConfig {
            mode: "stub".into(),
            normalize: true,
            ..Default::default()
        });
        let model = registry.get().await.unwrap();
        let vector = model.encode("normalize me").await.unwrap();
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn handle_reports_configured_model_name() {
        let registry = ModelRegistry::new(EmbedderConfig {
            mode: "stub".into(),
            model_name: "my-custom-model".into(),
            ..Default::default()
        });
        let model = registry.get().await.unwrap();
        assert_eq!(model.name(), "my-custom-model");
    }
}
