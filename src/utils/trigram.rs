use std::collections::HashSet;

/// Minimum title similarity for a post to count as a search hit.
pub const SIMILARITY_THRESHOLD: f64 = 0.1;

/// Trigrams of a string, computed the way PostgreSQL's pg_trgm does:
/// lowercase, split on non-alphanumerics, pad each word with two leading
/// spaces and one trailing space.
pub fn trigrams(text: &str) -> HashSet<String> {
    let mut set = HashSet::new();
    let lowered = text.to_lowercase();

    for word in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let padded: Vec<char> = format!("  {} ", word).chars().collect();
        for window in padded.windows(3) {
            set.insert(window.iter().collect());
        }
    }

    set
}

/// Shared trigrams over all distinct trigrams, in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let left = trigrams(a);
    let right = trigrams(b);

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    let shared = left.intersection(&right).count();

    shared as f64 / union as f64
}
