use catalog_client::browse::{
    similar_movies, suggested_movies, CatalogFilter, SortBy, SIMILAR_LIMIT, SUGGESTED_LIMIT,
};
use catalog_client::user_lists::{JsonFileStore, ListKind, UserLists};
use catalog_client::{CatalogClient, CatalogConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let config = CatalogConfig::load("catalog.yaml")?;
    let client = CatalogClient::from_config(&config)?;

    println!("=== Home ===");
    let featured = client.featured_movies().await?;
    for movie in featured.value().iter() {
        println!("  [featured] {} ({}, {})", movie.title, movie.genre, movie.year);
    }

    let start = std::time::Instant::now();
    let movies = client.movies().await?;
    println!("First listing took {:?} (cached: {})", start.elapsed(), movies.from_cache());

    let start = std::time::Instant::now();
    let again = client.movies().await?;
    println!("Second listing took {:?} (cached: {})", start.elapsed(), again.from_cache());

    println!("\n=== Catalog: Sci-Fi by rating ===");
    let filter = CatalogFilter::default()
        .with_genre("Sci-Fi")
        .with_sort(SortBy::Rating);
    for movie in filter.apply(movies.value()) {
        println!("  {:.1}  {}", movie.rating, movie.title);
    }

    println!("\n=== Detail ===");
    if let Some(movie) = client.movie(Some(3)).await?.value() {
        println!("{} [{}] {} {}", movie.title, movie.genre, movie.year, movie.duration);
        for review in &movie.reviews {
            println!("  {} rated {:.1}", review.author, review.rating);
        }
        for similar in similar_movies(movies.value(), &movie, SIMILAR_LIMIT) {
            println!("  similar: {}", similar.title);
        }
    }

    println!("\n=== My List ===");
    let mut lists = UserLists::load(JsonFileStore::open("lists.json")?)?;
    lists.seed_defaults(movies.value())?;
    for kind in [ListKind::Favorites, ListKind::Watchlist] {
        println!("{}:", kind);
        for movie in lists.movies_in(kind, movies.value()) {
            println!("  {}", movie.title);
        }
        for movie in suggested_movies(movies.value(), lists.list(kind), SUGGESTED_LIMIT) {
            println!("  suggested: {}", movie.title);
        }
    }

    println!("\nCache stats: {:?}", client.cache_stats());
    Ok(())
}
