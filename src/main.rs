//! Marketplace client entry point.
//!
//! Wires the state containers against their configured adapters and reports
//! the hydrated cart. Views embed [`MarketplaceState`] the same way.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use marketplace_client::adapters::{
    FileKeyValueStore, InMemoryReviewReader, InMemoryWishlistRepository, PostgresReviewReader,
    PostgresWishlistRepository, StaticIdentityProvider, TracingNotifier,
};
use marketplace_client::application::{MarketplaceDeps, MarketplaceState};
use marketplace_client::config::{AppConfig, LoggingConfig};
use marketplace_client::ports::{ProductReviewReader, WishlistRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    tracing::info!(
        data_dir = %config.storage.data_dir.display(),
        remote = config.has_database(),
        "Starting marketplace client"
    );

    let (wishlist_repository, review_reader): (
        Arc<dyn WishlistRepository>,
        Arc<dyn ProductReviewReader>,
    ) = match &config.database {
        Some(database) => {
            let pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .connect(&database.url)
                .await?;
            (
                Arc::new(PostgresWishlistRepository::new(pool.clone())),
                Arc::new(PostgresReviewReader::new(pool)),
            )
        }
        None => {
            tracing::warn!("No database configured; wishlist and reviews are in-memory");
            (
                Arc::new(InMemoryWishlistRepository::new()),
                Arc::new(InMemoryReviewReader::new()),
            )
        }
    };

    let state = MarketplaceState::new(MarketplaceDeps {
        cart_storage: Arc::new(FileKeyValueStore::new(&config.storage.data_dir)),
        cart_key: config.storage.cart_key.clone(),
        wishlist_repository,
        review_reader,
        identity: Arc::new(StaticIdentityProvider::anonymous()),
        notifier: Arc::new(TracingNotifier),
        wishlist_stale_after: config.wishlist.stale_after(),
    });

    let summary = state.cart.summary();
    for group in &summary.sellers {
        tracing::info!(
            seller_id = %group.seller_id,
            seller_name = %group.seller_name,
            item_count = group.item_count,
            subtotal = group.subtotal,
            "Cart seller group"
        );
    }
    tracing::info!(
        item_count = summary.item_count,
        subtotal = summary.subtotal,
        "Cart hydrated"
    );

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
