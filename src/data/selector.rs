// ============================================================
// Layer 4 — TF-IDF Chunk Selector
// ============================================================
// Picks the single chunk most similar to the question, so the
// model runs exactly once instead of once per chunk.
//
// The vector space is fit on the chunk collection ONLY — the
// question is projected into it afterwards, and question terms
// absent from every chunk contribute zero weight. Weighting
// follows the scikit-learn TfidfVectorizer defaults:
//
//   token    = run of 2+ word characters, lowercased
//   idf(t)   = ln((1 + n) / (1 + df(t))) + 1     (smoothed)
//   w(t, d)  = tf(t, d) * idf(t), rows L2-normalized
//
// Cosine similarity between L2-normalized vectors reduces to a
// dot product. Ties break on first occurrence, and a question
// with no vocabulary overlap at all scores zero everywhere and
// silently falls back to the first chunk.

use std::collections::HashMap;

use crate::domain::traits::ChunkSelector;

pub struct TfidfSelector;

impl TfidfSelector {
    pub fn new() -> Self {
        Self
    }

    /// Cosine similarity between the question and every chunk,
    /// in chunk order.
    pub fn similarities(&self, question: &str, chunks: &[String]) -> Vec<f32> {
        let n = chunks.len();

        // ── Vocabulary and document frequencies (chunks only) ─────────────────
        let chunk_tokens: Vec<Vec<String>> =
            chunks.iter().map(|c| tokenize(c)).collect();

        let mut vocab: HashMap<&str, usize> = HashMap::new();
        let mut df:    Vec<usize>           = Vec::new();

        for tokens in &chunk_tokens {
            let mut seen: Vec<usize> = Vec::new();
            for tok in tokens {
                let next_id = vocab.len();
                let id = *vocab.entry(tok.as_str()).or_insert(next_id);
                if id == df.len() {
                    df.push(0);
                }
                if !seen.contains(&id) {
                    df[id] += 1;
                    seen.push(id);
                }
            }
        }

        // Smoothed IDF: pretends one extra document containing every term,
        // so no weight is ever zero or divides by zero.
        let idf: Vec<f32> = df
            .iter()
            .map(|&d| ((1.0 + n as f32) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        // ── Chunk vectors: tf * idf, L2-normalized ────────────────────────────
        let chunk_vecs: Vec<HashMap<usize, f32>> = chunk_tokens
            .iter()
            .map(|tokens| {
                let mut tf: HashMap<usize, f32> = HashMap::new();
                for tok in tokens {
                    let id = vocab[tok.as_str()];
                    *tf.entry(id).or_insert(0.0) += 1.0;
                }
                let mut vec: HashMap<usize, f32> =
                    tf.into_iter().map(|(id, f)| (id, f * idf[id])).collect();
                l2_normalize(&mut vec);
                vec
            })
            .collect();

        // ── Question vector in the same space ─────────────────────────────────
        // Out-of-vocabulary question terms are simply dropped.
        let mut q_vec: HashMap<usize, f32> = HashMap::new();
        for tok in tokenize(question) {
            if let Some(&id) = vocab.get(tok.as_str()) {
                *q_vec.entry(id).or_insert(0.0) += 1.0;
            }
        }
        for (id, w) in q_vec.iter_mut() {
            *w *= idf[*id];
        }
        l2_normalize(&mut q_vec);

        chunk_vecs.iter().map(|cv| dot(&q_vec, cv)).collect()
    }
}

impl Default for TfidfSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkSelector for TfidfSelector {
    fn select(&self, question: &str, chunks: &[String]) -> usize {
        let sims = self.similarities(question, chunks);

        // Strict > keeps the FIRST maximum on ties, and index 0 wins
        // outright when every similarity is zero.
        let mut best_idx   = 0usize;
        let mut best_score = f32::MIN;
        for (i, &s) in sims.iter().enumerate() {
            if s > best_score {
                best_score = s;
                best_idx   = i;
            }
        }
        best_idx
    }
}

/// Lowercase tokens of 2+ word characters (letters, digits, underscore) —
/// the scikit-learn default token pattern.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn l2_normalize(vec: &mut HashMap<usize, f32>) {
    let norm = vec.values().map(|w| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for w in vec.values_mut() {
            *w /= norm;
        }
    }
}

fn dot(a: &HashMap<usize, f32>, b: &HashMap<usize, f32>) -> f32 {
    // Iterate the smaller map
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(id, wa)| large.get(id).map(|wb| wa * wb))
        .sum()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_verbatim_chunk_beats_every_other() {
        let sel = TfidfSelector::new();
        let question = "when does the spring term begin";
        let cs = chunks(&[
            "budget figures for the cafeteria renovation project",
            "when does the spring term begin",
            "minutes of the staff meeting about parking",
        ]);
        let sims = sel.similarities(question, &cs);
        assert!(sims[1] > 0.0);
        assert!(sims[1] >= sims[0]);
        assert!(sims[1] >= sims[2]);
        assert_eq!(sel.select(question, &cs), 1);
    }

    #[test]
    fn test_zero_overlap_falls_back_to_first_chunk() {
        let sel = TfidfSelector::new();
        let cs  = chunks(&["alpha beta gamma", "delta epsilon zeta"]);
        let sims = sel.similarities("xylophone quandary", &cs);
        assert!(sims.iter().all(|&s| s == 0.0));
        assert_eq!(sel.select("xylophone quandary", &cs), 0);
    }

    #[test]
    fn test_ties_break_on_first_occurrence() {
        let sel = TfidfSelector::new();
        // Identical chunks produce identical similarities.
        let cs = chunks(&["same words here", "same words here"]);
        assert_eq!(sel.select("same words", &cs), 0);
    }

    #[test]
    fn test_idf_downweights_terms_common_to_all_chunks() {
        let sel = TfidfSelector::new();
        // "meeting" appears everywhere; "graduation" only in chunk 1.
        let cs = chunks(&[
            "meeting about the budget",
            "meeting about the graduation ceremony",
            "meeting about parking",
        ]);
        assert_eq!(sel.select("graduation meeting", &cs), 1);
    }

    #[test]
    fn test_single_character_tokens_are_ignored(){
        let sel = TfidfSelector::new();
        // "a" and "i" never enter the vocabulary, so only "term" matches.
        let cs = chunks(&["a i term", "a i a i"]);
        assert_eq!(sel.select("term", &cs), 0);
        let sims = sel.similarities("a i", &cs);
        assert!(sims.iter().all(|&s| s == 0.0));
    }
}
