//! Per-column maximum selection.

use vecscope_chroma::Metadata;

use super::config::EmphasisRule;

/// Marks every position holding the column maximum.
///
/// Missing keys never win. All positions tied at the maximum are marked.
pub(crate) fn mark_maximum<K: PartialOrd>(keys: &[Option<K>]) -> Vec<bool> {
    let mut best: Option<&K> = None;
    for key in keys.iter().flatten() {
        if best.is_none_or(|current| key > current) {
            best = Some(key);
        }
    }

    keys.iter()
        .map(|key| matches!((key, best), (Some(key), Some(best)) if key == best))
        .collect()
}

/// Emphasis of a text column (`ids` or `documents`).
pub(crate) fn text<S: AsRef<str>>(values: &[Option<S>], rule: EmphasisRule) -> Vec<bool> {
    match rule {
        EmphasisRule::Lexical => {
            let keys: Vec<Option<&str>> = values
                .iter()
                .map(|v| v.as_ref().map(|s| s.as_ref()))
                .collect();
            mark_maximum(&keys)
        }
        EmphasisRule::Length => {
            let keys: Vec<_> = values
                .iter()
                .map(|v| v.as_ref().map(|s| s.as_ref().chars().count()))
                .collect();
            mark_maximum(&keys)
        }
        EmphasisRule::Norm | EmphasisRule::Off => vec![false; values.len()],
    }
}

/// Emphasis of the `embeddings` column.
pub(crate) fn embeddings(values: &[Option<Vec<f32>>], rule: EmphasisRule) -> Vec<bool> {
    match rule {
        EmphasisRule::Norm => {
            let keys: Vec<_> = values
                .iter()
                .map(|v| v.as_deref().map(l2_norm).filter(|norm| norm.is_finite()))
                .collect();
            mark_maximum(&keys)
        }
        EmphasisRule::Length => {
            let keys: Vec<_> = values.iter().map(|v| v.as_ref().map(Vec::len)).collect();
            mark_maximum(&keys)
        }
        EmphasisRule::Lexical | EmphasisRule::Off => vec![false; values.len()],
    }
}

/// Emphasis of the `metadata` column.
pub(crate) fn metadata(values: &[Option<Metadata>], rule: EmphasisRule) -> Vec<bool> {
    match rule {
        EmphasisRule::Lexical => {
            let keys: Vec<_> = values
                .iter()
                .map(|v| v.as_ref().map(super::table::compact_json))
                .collect();
            mark_maximum(&keys)
        }
        EmphasisRule::Length => {
            let keys: Vec<_> = values.iter().map(|v| v.as_ref().map(Metadata::len)).collect();
            mark_maximum(&keys)
        }
        EmphasisRule::Norm | EmphasisRule::Off => vec![false; values.len()],
    }
}

/// Euclidean norm, accumulated in `f64`.
fn l2_norm(components: &[f32]) -> f64 {
    components
        .iter()
        .map(|&c| f64::from(c) * f64::from(c))
        .sum::<f64>()
        .sqrt()
}
