use crate::catalog::{MovieInfo, MOVIE_DATA, RATINGS, REVIEW_TEMPLATES, YEARS};
use crate::movie::{Movie, RawResource, Review};
use rand::Rng;

/// Upper bound on the number of movies a listing produces.
pub const MAX_MOVIES: usize = 20;
/// Number of leading movies in a listing flagged as featured.
pub const FEATURED_COUNT: usize = 5;
/// Number of reviews attached to a detail fetch.
pub const REVIEWS_PER_MOVIE: usize = 5;

const IMAGE_SERVICE: &str = "https://picsum.photos/seed";

pub fn poster_url(id: u32) -> String {
    format!("{}/movie{}/300/450", IMAGE_SERVICE, id)
}

pub fn thumbnail_url(id: u32) -> String {
    format!("{}/movie{}/150/150", IMAGE_SERVICE, id)
}

pub fn backdrop_url(id: u32) -> String {
    format!("{}/backdrop{}/1920/1080", IMAGE_SERVICE, id)
}

/// Maps posts to movies by position. `photos` only exists because the
/// upstream batch is fetched alongside; its contents are not used.
pub fn transform_to_movies(posts: &[RawResource], photos: &[RawResource]) -> Vec<Movie> {
    log::debug!(
        "Transforming {} posts ({} photos fetched alongside)",
        posts.len(),
        photos.len()
    );

    posts
        .iter()
        .take(MAX_MOVIES)
        .enumerate()
        .map(|(index, post)| movie_at(index, post))
        .collect()
}

fn movie_at(index: usize, post: &RawResource) -> Movie {
    let info = &MOVIE_DATA[index % MOVIE_DATA.len()];

    Movie {
        id: post.id,
        title: info.title.to_string(),
        description: info.description.to_string(),
        genre: info.genre,
        year: YEARS[index % YEARS.len()],
        rating: RATINGS[index % RATINGS.len()],
        duration: format!("{}min", 90 + (index * 7) % 60),
        poster: poster_url(post.id),
        thumbnail: thumbnail_url(post.id),
        backdrop: backdrop_url(post.id),
        featured: index < FEATURED_COUNT,
        reviews: Vec::new(),
    }
}

/// Table entry used by detail fetches, keyed on the requested id rather than
/// on a listing position.
pub fn detail_info(id: u32) -> &'static MovieInfo {
    let index = id.wrapping_sub(1) as usize % MOVIE_DATA.len();
    &MOVIE_DATA[index]
}

/// Overrides title, description and genre with the id-keyed table entry.
pub fn apply_detail_info(movie: &mut Movie, id: u32) {
    let info = detail_info(id);
    movie.title = info.title.to_string();
    movie.description = info.description.to_string();
    movie.genre = info.genre;
}

/// Builds a review batch with ratings drawn from `[7.0, 9.5]`.
pub fn review_batch<R: Rng + ?Sized>(rng: &mut R) -> Vec<Review> {
    REVIEW_TEMPLATES
        .iter()
        .take(REVIEWS_PER_MOVIE)
        .enumerate()
        .map(|(idx, template)| Review {
            id: idx as u32 + 1,
            author: template.author.to_string(),
            email: review_email(template.author),
            content: template.content.to_string(),
            rating: ((7.0 + rng.gen::<f32>() * 2.5) * 10.0).round() / 10.0,
        })
        .collect()
}

fn review_email(author: &str) -> String {
    format!("{}@email.com", author.to_lowercase().replacen(' ', ".", 1))
}
