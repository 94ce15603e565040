/// Cosine similarity between two vectors: `dot(a, b) / (|a| * |b|)`.
///
/// Contract for degenerate inputs: if either vector has zero magnitude the
/// similarity is `0.0`. A zero vector has no direction, so no directional
/// closeness can be claimed, and returning a defined value keeps NaN out of
/// responses. Vectors of mismatched length compare over the shorter prefix;
/// in practice both always come from the same model and have equal length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
