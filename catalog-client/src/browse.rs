//! Catalog filtering, sorting and the small pieces of page state that drive
//! the catalog, category, detail and list views.

use crate::movie::{Genre, Movie};
use crate::user_lists::{IdList, ListKind};
use std::cmp::Ordering;
use strum_macros::{Display, EnumIter, EnumString};

/// Genre filter value that matches every movie.
pub const ALL_GENRES: &str = "All";

/// Genre filter options in the order the catalog page offers them.
pub const GENRE_FILTERS: [&str; 9] = [
    ALL_GENRES,
    "Action",
    "Comedy",
    "Drama",
    "Sci-Fi",
    "Horror",
    "Romance",
    "Thriller",
    "Animation",
];

/// Number of related titles shown under a movie's detail page.
pub const SIMILAR_LIMIT: usize = 5;

/// Number of titles suggested under a user's list.
pub const SUGGESTED_LIMIT: usize = 5;

/// Seconds between hero slides on the home page.
pub const HERO_ROTATE_SECS: u64 = 6;

/// Scroll offset past which the navigation bar switches to its solid style.
pub const NAV_SCROLL_THRESHOLD: f64 = 50.0;

/// Exact genre match. Empty or `"All"` keeps everything.
pub fn filter_by_genre(movies: Vec<Movie>, genre: &str) -> Vec<Movie> {
    if genre.is_empty() || genre == ALL_GENRES {
        return movies;
    }
    movies
        .into_iter()
        .filter(|movie| movie.genre.to_string() == genre)
        .collect()
}

/// Case-insensitive substring match on title or genre. Empty keeps everything.
pub fn search_filter(movies: Vec<Movie>, term: &str) -> Vec<Movie> {
    if term.is_empty() {
        return movies;
    }
    let needle = term.to_lowercase();
    movies
        .into_iter()
        .filter(|movie| {
            movie.title.to_lowercase().contains(&needle)
                || movie.genre.to_string().to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn movies_in_genre(movies: &[Movie], genre: Genre) -> Vec<&Movie> {
    movies.iter().filter(|movie| movie.genre == genre).collect()
}

/// Other movies sharing `movie`'s genre, in catalog order.
pub fn similar_movies<'a>(all: &'a [Movie], movie: &Movie, limit: usize) -> Vec<&'a Movie> {
    all.iter()
        .filter(|other| other.genre == movie.genre && other.id != movie.id)
        .take(limit)
        .collect()
}

/// Catalog movies not yet on `list`, in catalog order.
pub fn suggested_movies<'a>(all: &'a [Movie], list: &IdList, limit: usize) -> Vec<&'a Movie> {
    all.iter()
        .filter(|movie| !list.contains(movie.id))
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SortBy {
    #[default]
    Title,
    Rating,
    Year,
}

impl SortBy {
    pub fn sort(self, movies: &mut [Movie]) {
        match self {
            SortBy::Title => movies.sort_by(|a, b| compare_titles(&a.title, &b.title)),
            SortBy::Rating => movies.sort_by(|a, b| {
                b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
            }),
            SortBy::Year => movies.sort_by(|a, b| b.year.cmp(&a.year)),
        }
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Search, genre and sort selection of the catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    pub search_term: String,
    pub genre: String,
    pub sort_by: SortBy,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            genre: ALL_GENRES.to_string(),
            sort_by: SortBy::default(),
        }
    }
}

impl CatalogFilter {
    pub fn with_search(self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..self
        }
    }

    pub fn with_genre(self, genre: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            ..self
        }
    }

    pub fn with_sort(self, sort_by: SortBy) -> Self {
        Self { sort_by, ..self }
    }

    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty() || self.genre != ALL_GENRES
    }

    pub fn apply(&self, movies: &[Movie]) -> Vec<Movie> {
        let searched = search_filter(movies.to_vec(), &self.search_term);
        let mut result = filter_by_genre(searched, &self.genre);
        self.sort_by.sort(&mut result);
        result
    }
}

/// Home page hero slider position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    pub current: usize,
    pub len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    pub fn advance(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            current: (self.current + 1) % self.len,
            ..self
        }
    }

    pub fn select(self, index: usize) -> Self {
        if index >= self.len {
            return self;
        }
        Self {
            current: index,
            ..self
        }
    }

    pub fn current<'a>(&self, movies: &'a [Movie]) -> Option<&'a Movie> {
        movies.get(self.current)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
    pub menu_open: bool,
}

impl NavState {
    pub fn on_scroll(self, offset: f64) -> Self {
        Self {
            scrolled: offset > NAV_SCROLL_THRESHOLD,
            ..self
        }
    }

    pub fn toggle_menu(self) -> Self {
        Self {
            menu_open: !self.menu_open,
            ..self
        }
    }

    pub fn close_menu(self) -> Self {
        Self {
            menu_open: false,
            ..self
        }
    }
}

/// Active tab of the favorites / watch-later panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListsPanel {
    pub active: ListKind,
}

impl Default for ListsPanel {
    fn default() -> Self {
        Self {
            active: ListKind::Favorites,
        }
    }
}

impl ListsPanel {
    pub fn select(self, active: ListKind) -> Self {
        Self { active }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::RawResource;
    use crate::transform::transform_to_movies;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn catalog() -> Vec<Movie> {
        let posts: Vec<_> = (1..=20).map(RawResource::new).collect();
        transform_to_movies(&posts, &[])
    }

    #[test]
    fn test_genre_filters_match_genres() {
        let names: Vec<String> = Genre::iter().map(|g| g.to_string()).collect();
        assert_eq!(&GENRE_FILTERS[1..], names.as_slice());
    }

    #[test]
    fn test_search_matches_title_or_genre() {
        let movies = catalog();
        let sci_fi = search_filter(movies.clone(), "sci");
        assert_eq!(sci_fi.len(), 3);
        assert!(sci_fi.iter().all(|m| m.genre == Genre::SciFi));

        let love = search_filter(movies, "LOVE");
        assert_eq!(love.len(), 1);
        assert_eq!(love[0].title, "Love in Paris");
    }

    #[test]
    fn test_sorting() {
        let mut movies = catalog();

        SortBy::Rating.sort(&mut movies);
        assert_eq!(movies[0].rating, 9.0);
        assert!(movies.windows(2).all(|w| w[0].rating >= w[1].rating));

        SortBy::Year.sort(&mut movies);
        assert_eq!(movies[0].year, 2024);

        SortBy::Title.sort(&mut movies);
        assert_eq!(movies[0].title, "Broken Dreams");
        assert_eq!(movies[19].title, "Wedding Chaos");
    }

    #[test]
    fn test_sort_by_parses_lowercase() {
        assert_eq!(SortBy::from_str("rating").unwrap(), SortBy::Rating);
        assert_eq!(SortBy::Year.to_string(), "year");
    }

    #[test]
    fn test_catalog_filter_pipeline() {
        let movies = catalog();
        let filter = CatalogFilter::default();
        assert!(!filter.is_filtered());
        assert_eq!(filter.apply(&movies).len(), 20);

        let filter = filter.with_genre("Drama").with_sort(SortBy::Year);
        assert!(filter.is_filtered());
        let dramas = filter.apply(&movies);
        assert_eq!(dramas.len(), 3);
        assert!(dramas.windows(2).all(|w| w[0].year >= w[1].year));

        let filter = filter.with_search("letter");
        let result = filter.apply(&movies);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "The Last Letter");
    }

    #[test]
    fn test_similar_movies_excludes_self() {
        let movies = catalog();
        let similar = similar_movies(&movies, &movies[0], SIMILAR_LIMIT);
        let ids: Vec<_> = similar.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![9, 17]);
        assert_eq!(movies_in_genre(&movies, Genre::Action).len(), 3);
    }

    #[test]
    fn test_suggested_movies_skip_listed() {
        let movies = catalog();
        let ids = |list: &IdList| -> Vec<u32> {
            suggested_movies(&movies, list, SUGGESTED_LIMIT)
                .iter()
                .map(|m| m.id)
                .collect()
        };

        assert_eq!(ids(&IdList::from_ids([1, 2, 3])), vec![4, 5, 6, 7, 8]);
        assert_eq!(ids(&IdList::from_ids([5, 2])), vec![1, 3, 4, 6, 7]);
        assert_eq!(ids(&IdList::default()), vec![1, 2, 3, 4, 5]);
        assert!(ids(&IdList::from_ids(1..=20)).is_empty());
    }

    #[test]
    fn test_carousel_wraps() {
        let carousel = Carousel::new(3);
        let carousel = carousel.advance().advance().advance();
        assert_eq!(carousel.current, 0);
        assert_eq!(carousel.select(2).current, 2);
        assert_eq!(carousel.select(5).current, 0);
        assert_eq!(Carousel::new(0).advance().current, 0);
    }

    #[test]
    fn test_nav_state() {
        let nav = NavState::default().on_scroll(120.0).toggle_menu();
        assert!(nav.scrolled);
        assert!(nav.menu_open);
        let nav = nav.on_scroll(10.0).close_menu();
        assert_eq!(nav, NavState::default());
    }

    #[test]
    fn test_lists_panel_select() {
        let panel = ListsPanel::default();
        assert_eq!(panel.active, ListKind::Favorites);
        assert_eq!(panel.select(ListKind::Watchlist).active, ListKind::Watchlist);
    }
}
