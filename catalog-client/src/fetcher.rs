use crate::browse::{filter_by_genre, search_filter};
use crate::error::Result;
use crate::movie::{Movie, User};
use crate::transform::{apply_detail_info, review_batch, transform_to_movies, FEATURED_COUNT};
use crate::upstream::Upstream;
use futures::try_join;
use std::sync::Arc;

/// Size of the photo batch fetched alongside listings and detail pages.
pub const PHOTO_BATCH: usize = 20;

/// Issues the upstream calls for each catalog operation and turns the
/// results into movies. No caching happens at this level.
#[derive(Clone)]
pub struct Fetcher {
    upstream: Arc<dyn Upstream>,
}

impl Fetcher {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let (posts, photos) = try_join!(
            self.upstream.posts(None),
            self.upstream.photos(PHOTO_BATCH)
        )?;
        Ok(transform_to_movies(&posts, &photos))
    }

    /// Detail fetch. Title, description and genre come from the requested
    /// id, so they can differ from what the same id shows in a listing.
    pub async fn get_one(&self, id: u32) -> Result<Movie> {
        let (post, photos) = try_join!(self.upstream.post(id), self.upstream.photos(PHOTO_BATCH))?;

        let mut movie = transform_to_movies(std::slice::from_ref(&post), &photos)
            .into_iter()
            .next()
            .ok_or(crate::Error::NotFound(id))?;
        apply_detail_info(&mut movie, id);
        movie.reviews = review_batch(&mut rand::thread_rng());
        Ok(movie)
    }

    pub async fn list_by_genre(&self, genre: &str) -> Result<Vec<Movie>> {
        Ok(filter_by_genre(self.list_all().await?, genre))
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Movie>> {
        Ok(search_filter(self.list_all().await?, term))
    }

    pub async fn list_featured(&self) -> Result<Vec<Movie>> {
        let (posts, photos) = try_join!(
            self.upstream.posts(Some(FEATURED_COUNT)),
            self.upstream.photos(FEATURED_COUNT)
        )?;
        Ok(transform_to_movies(&posts, &photos))
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.upstream.users().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::movie::Genre;
    use crate::tests::MockUpstream;

    #[tokio::test]
    async fn test_list_all_uses_both_collections() {
        let upstream = Arc::new(MockUpstream::with_posts(1..=100));
        let fetcher = Fetcher::new(upstream.clone());

        let movies = fetcher.list_all().await.unwrap();

        assert_eq!(movies.len(), 20);
        assert_eq!(upstream.posts_calls(), 1);
        assert_eq!(upstream.photos_calls(), 1);
        assert_eq!(upstream.last_photo_limit(), Some(PHOTO_BATCH));
    }

    #[tokio::test]
    async fn test_list_all_fails_when_photos_fail() {
        let upstream = Arc::new(MockUpstream::with_posts(1..=3));
        upstream.fail_photos(true);

        let err = Fetcher::new(upstream).list_all().await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_get_one_uses_requested_id() {
        let upstream = Arc::new(MockUpstream::with_posts(1..=100));
        let fetcher = Fetcher::new(upstream);

        let movie = fetcher.get_one(4).await.unwrap();
        assert_eq!(movie.id, 4);
        assert_eq!(movie.title, "Galaxy Runners");
        assert_eq!(movie.genre, Genre::SciFi);
        // Position-derived fields still come from index 0.
        assert_eq!(movie.year, 2020);
        assert!(movie.featured);
        assert_eq!(movie.reviews.len(), 5);
    }

    #[tokio::test]
    async fn test_listing_and_detail_disagree_on_genre() {
        let fetcher = Fetcher::new(Arc::new(MockUpstream::with_posts([10, 20, 30])));

        let listed = fetcher.list_all().await.unwrap();
        assert_eq!(listed[1].id, 20);
        assert_eq!(listed[1].title, "Laugh Out Loud");
        assert_eq!(listed[1].genre, Genre::Comedy);

        let detail = fetcher.get_one(20).await.unwrap();
        assert_eq!(detail.title, "Star Voyager");
        assert_eq!(detail.genre, Genre::SciFi);
    }

    #[tokio::test]
    async fn test_get_one_not_found() {
        let fetcher = Fetcher::new(Arc::new(MockUpstream::with_posts(1..=3)));
        assert_eq!(fetcher.get_one(99).await.unwrap_err(), Error::NotFound(99));
    }

    #[tokio::test]
    async fn test_genre_and_search_filters() {
        let fetcher = Fetcher::new(Arc::new(MockUpstream::with_posts(1..=100)));
        let all = fetcher.list_all().await.unwrap();

        assert_eq!(fetcher.list_by_genre("All").await.unwrap(), all);
        assert_eq!(fetcher.list_by_genre("").await.unwrap(), all);

        let action = fetcher.list_by_genre("Action").await.unwrap();
        assert_eq!(action.len(), 3);
        assert!(action.iter().all(|m| m.genre == Genre::Action));
        assert!(fetcher.list_by_genre("action").await.unwrap().is_empty());

        assert_eq!(fetcher.search("").await.unwrap(), all);
        let searched = fetcher.search("ACTION").await.unwrap();
        assert_eq!(searched, action);

        let by_title = fetcher.search("dark").await.unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "The Dark Horizon");
    }

    #[tokio::test]
    async fn test_list_featured_uses_small_batch() {
        let upstream = Arc::new(MockUpstream::with_posts(1..=100));
        let movies = Fetcher::new(upstream.clone()).list_featured().await.unwrap();

        assert_eq!(movies.len(), 5);
        assert!(movies.iter().all(|m| m.featured));
        assert_eq!(upstream.last_posts_limit(), Some(Some(5)));
        assert_eq!(upstream.last_photo_limit(), Some(5));
    }
}
