use std::sync::Arc;

use anyhow::{anyhow, Result};

use billed::models::{User, UserType};
use billed::paths;
use billed::router::Router;
use billed::services::session::MemoryStorage;
use billed::services::store::MemoryStore;
use billed::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_max_level(settings.tracing_level())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| paths::BILLS.to_string());
    let email = std::env::var("BILLED_EMAIL").unwrap_or_else(|_| "a@a".to_string());
    let storage = MemoryStorage::with_user(&User {
        user_type: UserType::Employee,
        email,
    })?;
    let store = MemoryStore::with_fixtures()?;

    let router = Router::new(store, Arc::new(storage), settings);
    router.on_navigate(&path).await?;

    let document = router.document();
    let document = document.lock().map_err(|_| anyhow!("Document lock"))?;
    println!("{}", document.body());
    Ok(())
}
