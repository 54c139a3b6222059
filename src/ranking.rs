use crate::{entities::movie, error::AppResult, store::MovieStore};

/// Reloads the list by rating, assigns ranks by position and persists every
/// rank that changed. Each write is its own statement; a failure part way
/// leaves the earlier ranks written. A movie deleted between the read and
/// its write is skipped.
pub async fn rerank(store: &MovieStore) -> AppResult<Vec<movie::Model>> {
    let mut movies = store.list_by_rating().await?;
    let mut written = 0usize;

    for (movie, rank) in movies.iter_mut().zip(1..) {
        if movie.ranking == Some(rank) {
            continue;
        }
        store.set_ranking(movie.id, rank).await?;
        movie.ranking = Some(rank);
        written += 1;
    }

    tracing::debug!(movies = movies.len(), written, "ranking recomputed");
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::connect_in_memory,
        models::{MoviePatch, NewMovie},
    };

    fn movie(title: &str, rating: Option<f64>) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: 2000,
            description: String::new(),
            rating,
            review: None,
            img_url: String::new(),
        }
    }

    #[tokio::test]
    async fn ranks_follow_rating_with_unrated_last() {
        let store = MovieStore::new(connect_in_memory().await);
        let c = store.insert(movie("C", None)).await.unwrap();
        let b = store.insert(movie("B", Some(7.0))).await.unwrap();
        let a = store.insert(movie("A", Some(9.0))).await.unwrap();

        let ranked = rerank(&store).await.unwrap();
        let ranks: Vec<_> = ranked.iter().map(|m| (m.title.as_str(), m.ranking)).collect();
        assert_eq!(ranks, [("A", Some(1)), ("B", Some(2)), ("C", Some(3))]);

        assert_eq!(store.get(a.id).await.unwrap().ranking, Some(1));
        assert_eq!(store.get(b.id).await.unwrap().ranking, Some(2));
        assert_eq!(store.get(c.id).await.unwrap().ranking, Some(3));
    }

    #[tokio::test]
    async fn ranks_equal_position_for_distinct_ratings() {
        let store = MovieStore::new(connect_in_memory().await);
        let ratings = [3.5, 9.9, 0.0, 7.25, 5.0, 8.0];
        for (i, rating) in ratings.iter().enumerate() {
            store.insert(movie(&format!("M{i}"), Some(*rating))).await.unwrap();
        }

        rerank(&store).await.unwrap();

        let mut sorted = ratings.to_vec();
        sorted.sort_by(|a, b| b.total_cmp(a));
        for stored in store.list_by_rating().await.unwrap() {
            let expected = sorted.iter().position(|r| Some(*r) == stored.rating).unwrap() + 1;
            assert_eq!(stored.ranking, Some(expected as i32), "{}", stored.title);
        }
    }

    #[tokio::test]
    async fn rating_change_moves_rank() {
        let store = MovieStore::new(connect_in_memory().await);
        let a = store.insert(movie("A", Some(9.0))).await.unwrap();
        let b = store.insert(movie("B", Some(7.0))).await.unwrap();
        rerank(&store).await.unwrap();

        store.update(b.id, MoviePatch { rating: Some(9.5), ..Default::default() }).await.unwrap();
        rerank(&store).await.unwrap();

        assert_eq!(store.get(b.id).await.unwrap().ranking, Some(1));
        assert_eq!(store.get(a.id).await.unwrap().ranking, Some(2));
    }

    #[tokio::test]
    async fn unchanged_ranks_are_stable() {
        let store = MovieStore::new(connect_in_memory().await);
        store.insert(movie("A", Some(9.0))).await.unwrap();
        store.insert(movie("B", Some(7.0))).await.unwrap();

        let first = rerank(&store).await.unwrap();
        let second = rerank(&store).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_store_ranks_nothing() {
        let store = MovieStore::new(connect_in_memory().await);
        assert!(rerank(&store).await.unwrap().is_empty());
    }
}
