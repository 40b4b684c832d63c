//! Containers bind document events to store calls and view updates.

pub mod bills;
pub mod dashboard;
pub mod new_bill;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::dom::{Document, EventKind};
use crate::error::{AppError, AppResult};
use crate::router::{Navigator, Route};
use crate::services::session::{SessionStorage, USER_KEY};
use crate::services::store::BillStore;
use crate::settings::Settings;

pub const DISCONNECT: &str = "layout-disconnect";

/// Dependencies handed to every container.
pub struct Context<S: BillStore> {
    pub document: Arc<Mutex<Document>>,
    pub store: Arc<S>,
    pub storage: Arc<dyn SessionStorage>,
    pub settings: Arc<Settings>,
    pub navigator: Navigator,
}

impl<S: BillStore> Clone for Context<S> {
    fn clone(&self) -> Self {
        Context {
            document: self.document.clone(),
            store: self.store.clone(),
            storage: self.storage.clone(),
            settings: self.settings.clone(),
            navigator: self.navigator.clone(),
        }
    }
}

impl<S: BillStore> Context<S> {
    pub fn document(&self) -> AppResult<MutexGuard<'_, Document>> {
        self.document.lock().map_err(|_| AppError::Lock("Document"))
    }

    pub fn listen(&self, listeners: &[(&'static str, EventKind)]) -> AppResult<()> {
        let mut document = self.document()?;
        for &(test_id, kind) in listeners {
            document.add_listener(test_id, kind);
        }
        Ok(())
    }

    /// Drops the session user and returns to the login page.
    pub fn logout(&self) {
        self.storage.remove_item(USER_KEY);
        tracing::info!("user disconnected");
        self.navigator.navigate(Route::Login);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::Context;
    use crate::dom::Document;
    use crate::models::{User, UserType};
    use crate::router::{Navigator, Route};
    use crate::services::session::MemoryStorage;
    use crate::services::store::BillStore;
    use crate::settings::Settings;

    /// Context whose navigator only records the requested routes.
    pub fn context<S: BillStore>(store: S) -> (Context<S>, Arc<Mutex<Vec<Route>>>) {
        let routes = Arc::new(Mutex::new(Vec::new()));
        let recorded = routes.clone();
        let user = User {
            user_type: UserType::Employee,
            email: "a@a".into(),
        };
        let ctx = Context {
            document: Arc::new(Mutex::new(Document::new())),
            store: Arc::new(store),
            storage: Arc::new(MemoryStorage::with_user(&user).unwrap()),
            settings: Arc::new(Settings::default()),
            navigator: Navigator::new(move |route| recorded.lock().unwrap().push(route)),
        };
        (ctx, routes)
    }
}
