use std::cmp::Ordering;

use crate::post::post_model::{Post, PostView, SearchResult};
use crate::utils::trigram::{SIMILARITY_THRESHOLD, similarity};

/// Similar posts shown under a post.
pub const SIMILAR_POSTS_LIMIT: usize = 4;

/// Rank candidates by shared tags with `post` (desc), then publish time
/// (desc). Candidates sharing no tag, and `post` itself, are dropped.
pub fn similar_posts(post: &Post, candidates: Vec<Post>) -> Vec<Post> {
    let mut scored: Vec<(usize, Post)> = candidates
        .into_iter()
        .filter(|candidate| candidate.id != post.id)
        .map(|candidate| (post.shared_tag_count(&candidate), candidate))
        .filter(|(shared, _)| *shared > 0)
        .collect();

    scored.sort_by(|(a_shared, a), (b_shared, b)| {
        b_shared.cmp(a_shared).then_with(|| b.publish.cmp(&a.publish))
    });

    scored
        .into_iter()
        .take(SIMILAR_POSTS_LIMIT)
        .map(|(_, post)| post)
        .collect()
}

/// Title search, best match first.
pub fn search_titles(query: &str, posts: &[Post]) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = posts
        .iter()
        .map(|post| SearchResult {
            similarity: similarity(&post.title, query),
            post: PostView::from(post),
        })
        .filter(|result| result.similarity >= SIMILARITY_THRESHOLD)
        .collect();

    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.post.publish.cmp(&a.post.publish))
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{post, tag};

    #[test]
    fn ranks_by_shared_tags_then_recency() {
        let (a, b, c) = (tag("a"), tag("b"), tag("c"));
        let target = post("target", 10, &[&a, &b]);
        let two_old = post("two-old", 1, &[&a, &b]);
        let one_new = post("one-new", 9, &[&a]);
        let one_old = post("one-old", 2, &[&b, &c]);
        let none = post("none", 8, &[&c]);

        let ranked = similar_posts(
            &target,
            vec![one_old.clone(), none, one_new.clone(), target.clone(), two_old.clone()],
        );
        let slugs: Vec<&str> = ranked.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["two-old", "one-new", "one-old"]);
    }

    #[test]
    fn keeps_at_most_four() {
        let a = tag("a");
        let target = post("target", 10, &[&a]);
        let candidates = (0..6).map(|i| post(&format!("p{}", i), i, &[&a])).collect();
        let ranked = similar_posts(&target, candidates);
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].slug, "p5");
    }

    #[test]
    fn search_filters_and_orders() {
        let mut posts = vec![
            post("django", 1, &[]),
            post("django-unchained", 2, &[]),
            post("rust", 3, &[]),
        ];
        posts[0].title = "Django".into();
        posts[1].title = "Django tips and tricks".into();
        posts[2].title = "Rust".into();

        let results = search_titles("Djngo", &posts);
        let titles: Vec<&str> = results.iter().map(|r| r.post.title.as_str()).collect();
        assert_eq!(titles, vec!["Django", "Django tips and tricks"]);
        assert!(results[0].similarity > results[1].similarity);

        assert!(search_titles("zzzz", &posts).is_empty());
    }
}
