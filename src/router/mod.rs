use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::containers::bills::{BillsContainer, EYE_ICON, NEW_BILL_BUTTON};
use crate::containers::dashboard::DashboardContainer;
use crate::containers::new_bill::{NewBillContainer, FILE_INPUT, FORM};
use crate::containers::{Context, DISCONNECT};
use crate::dom::{Document, EventKind, NavIcon};
use crate::error::{AppError, AppResult};
use crate::models::ReceiptFile;
use crate::services::session::{current_user, SessionStorage};
use crate::services::store::BillStore;
use crate::settings::Settings;
use crate::views::bills::{bills_ui, BillsView};
use crate::views::dashboard::dashboard_ui;
use crate::views::layout::{error_page, loading_page, not_found_page};
use crate::views::login::login_ui;
use crate::views::new_bill::new_bill_ui;

pub mod paths {
    pub const LOGIN: &str = "/";
    pub const BILLS: &str = "#employee/bills";
    pub const NEW_BILL: &str = "#employee/bill/new";
    pub const DASHBOARD: &str = "#admin/dashboard";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
    NotFound(String),
}

impl Route {
    pub fn resolve(path: &str) -> Route {
        match path.trim() {
            paths::LOGIN | "" => Route::Login,
            paths::BILLS => Route::Bills,
            paths::NEW_BILL => Route::NewBill,
            paths::DASHBOARD => Route::Dashboard,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Login => paths::LOGIN,
            Route::Bills => paths::BILLS,
            Route::NewBill => paths::NEW_BILL,
            Route::Dashboard => paths::DASHBOARD,
            Route::NotFound(path) => path.as_str(),
        }
    }

    pub fn nav_icon(&self) -> Option<NavIcon> {
        match self {
            Route::Bills => Some(NavIcon::Window),
            Route::NewBill => Some(NavIcon::Mail),
            _ => None,
        }
    }

    fn requires_session(&self) -> bool {
        matches!(self, Route::Bills | Route::NewBill | Route::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Handle given to containers so they can request a navigation.
#[derive(Clone)]
pub struct Navigator(Arc<dyn Fn(Route) + Send + Sync>);

impl Navigator {
    pub fn new(f: impl Fn(Route) + Send + Sync + 'static) -> Self {
        Navigator(Arc::new(f))
    }

    pub fn navigate(&self, route: Route) {
        (self.0)(route)
    }
}

/// User interaction delivered to the mounted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ClickNewBill,
    ClickEyeIcon(usize),
    ChangeFile(ReceiptFile),
    SubmitNewBill,
    Disconnect,
}

impl Event {
    fn listener(&self) -> (&'static str, EventKind) {
        match self {
            Event::ClickNewBill => (NEW_BILL_BUTTON, EventKind::Click),
            Event::ClickEyeIcon(_) => (EYE_ICON, EventKind::Click),
            Event::ChangeFile(_) => (FILE_INPUT, EventKind::Change),
            Event::SubmitNewBill => (FORM, EventKind::Submit),
            Event::Disconnect => (DISCONNECT, EventKind::Click),
        }
    }
}

enum ActiveContainer<S: BillStore> {
    Static,
    Bills(BillsContainer<S>),
    NewBill(NewBillContainer<S>),
    Dashboard(DashboardContainer<S>),
}

struct PendingLoad<S: BillStore> {
    generation: u64,
    container: Arc<ActiveContainer<S>>,
}

struct Inner<S: BillStore> {
    document: Arc<Mutex<Document>>,
    store: Arc<S>,
    storage: Arc<dyn SessionStorage>,
    settings: Arc<Settings>,
    active: Mutex<Option<Arc<ActiveContainer<S>>>>,
    pending_tx: mpsc::UnboundedSender<PendingLoad<S>>,
    pending_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<PendingLoad<S>>>,
}

/// Resolves paths to views, mounts the matching container and routes
/// document events to it.
pub struct Router<S: BillStore> {
    inner: Arc<Inner<S>>,
}

impl<S: BillStore> Clone for Router<S> {
    fn clone(&self) -> Self {
        Router {
            inner: self.inner.clone(),
        }
    }
}

impl<S: BillStore> Router<S> {
    pub fn new(store: S, storage: Arc<dyn SessionStorage>, settings: Settings) -> Self {
        let (pending_tx, pending_rx) = mpsc::unbounded_channel();
        Router {
            inner: Arc::new(Inner {
                document: Arc::new(Mutex::new(Document::new())),
                store: Arc::new(store),
                storage,
                settings: Arc::new(settings),
                active: Mutex::new(None),
                pending_tx,
                pending_rx: tokio::sync::Mutex::new(pending_rx),
            }),
        }
    }

    pub fn document(&self) -> Arc<Mutex<Document>> {
        self.inner.document.clone()
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    pub fn storage(&self) -> &dyn SessionStorage {
        self.inner.storage.as_ref()
    }

    /// Renders `path` and waits for its data to arrive.
    pub async fn on_navigate(&self, path: &str) -> AppResult<()> {
        let (generation, container) = self.render(Route::resolve(path))?;
        self.load(generation, container).await
    }

    /// Completes the data loads of navigations requested by containers.
    pub async fn settle(&self) -> AppResult<()> {
        loop {
            let next = self.inner.pending_rx.lock().await.try_recv();
            match next {
                Ok(pending) => self.load(pending.generation, pending.container).await?,
                Err(_) => return Ok(()),
            }
        }
    }

    /// Delivers `event` to the mounted view. Returns `false` when the view
    /// has no listener for it. Handler failures are logged and rendered,
    /// never returned.
    pub async fn dispatch(&self, event: Event) -> AppResult<bool> {
        let (test_id, kind) = event.listener();
        if !self.lock_document()?.has_listener(test_id, kind) {
            debug!(test_id, ?kind, "no listener on current view");
            return Ok(false);
        }
        let Some(container) = self.lock_active()?.clone() else {
            return Ok(false);
        };

        let handled = match (event, container.as_ref()) {
            (Event::ClickNewBill, ActiveContainer::Bills(bills)) => {
                bills.handle_click_new_bill();
                true
            }
            (Event::ClickEyeIcon(index), ActiveContainer::Bills(bills)) => {
                let icon = self.lock_document()?.query_all(EYE_ICON).into_iter().nth(index);
                match icon {
                    Some(icon) => {
                        bills.handle_click_icon_eye(&icon)?;
                        true
                    }
                    None => false,
                }
            }
            (Event::ChangeFile(file), ActiveContainer::NewBill(new_bill)) => {
                self.lock_document()?
                    .set_input_value(FILE_INPUT, format!("C:\\fakepath\\{}", file.name));
                match new_bill.handle_change_file(file).await {
                    Ok(()) | Err(AppError::Validation(_)) => {}
                    Err(e) => error!(error = %e, "receipt selection failed"),
                }
                true
            }
            (Event::SubmitNewBill, ActiveContainer::NewBill(new_bill)) => {
                if let Err(e) = new_bill.handle_submit().await {
                    error!(error = %e, "bill submission failed");
                }
                true
            }
            (Event::Disconnect, ActiveContainer::Bills(c)) => {
                c.context().logout();
                true
            }
            (Event::Disconnect, ActiveContainer::NewBill(c)) => {
                c.context().logout();
                true
            }
            (Event::Disconnect, ActiveContainer::Dashboard(c)) => {
                c.context().logout();
                true
            }
            _ => false,
        };

        self.settle().await?;
        Ok(handled)
    }

    fn navigator(&self) -> Navigator {
        let weak: Weak<Inner<S>> = Arc::downgrade(&self.inner);
        Navigator::new(move |route| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let router = Router { inner };
            match router.render(route) {
                Ok((generation, container)) => {
                    if router
                        .inner
                        .pending_tx
                        .send(PendingLoad {
                            generation,
                            container,
                        })
                        .is_err()
                    {
                        warn!("navigation queue closed");
                    }
                }
                Err(e) => error!(error = %e, "navigation failed"),
            }
        })
    }

    fn context(&self) -> Context<S> {
        Context {
            document: self.inner.document.clone(),
            store: self.inner.store.clone(),
            storage: self.inner.storage.clone(),
            settings: self.inner.settings.clone(),
            navigator: self.navigator(),
        }
    }

    /// Mounts the view for `route` synchronously and returns its generation.
    fn render(&self, route: Route) -> AppResult<(u64, Arc<ActiveContainer<S>>)> {
        let route = if route.requires_session() && !self.has_session() {
            warn!(%route, "no session user, showing login");
            Route::Login
        } else {
            route
        };

        let html = match &route {
            Route::Login => login_ui(),
            Route::Bills => bills_ui(BillsView::Loading),
            Route::NewBill => new_bill_ui(),
            Route::Dashboard => loading_page(),
            Route::NotFound(path) => not_found_page(path),
        }
        .into_string();
        let generation = {
            let mut document = self.lock_document()?;
            let generation = document.replace_view(html);
            document.set_active_icon(route.nav_icon());
            generation
        };

        let container = Arc::new(match route {
            Route::Bills => ActiveContainer::Bills(BillsContainer::new(self.context())?),
            Route::NewBill => ActiveContainer::NewBill(NewBillContainer::new(self.context())?),
            Route::Dashboard => ActiveContainer::Dashboard(DashboardContainer::new(self.context())?),
            Route::Login | Route::NotFound(_) => ActiveContainer::Static,
        });
        *self.lock_active()? = Some(container.clone());
        info!(%route, generation, "navigated");
        Ok((generation, container))
    }

    async fn load(&self, generation: u64, container: Arc<ActiveContainer<S>>) -> AppResult<()> {
        let html = match container.as_ref() {
            ActiveContainer::Bills(bills) => match bills.fetch_bills().await {
                Ok(rows) => bills_ui(BillsView::Rows(&rows)),
                Err(e) => bills_ui(BillsView::Error(&e.message)),
            },
            ActiveContainer::Dashboard(dashboard) => match dashboard.fetch_bills().await {
                Ok(bills) => dashboard_ui(&bills),
                Err(e) => error_page(&e.message),
            },
            ActiveContainer::NewBill(_) | ActiveContainer::Static => return Ok(()),
        }
        .into_string();
        if !self.lock_document()?.patch(generation, html) {
            warn!(generation, "discarding response for a replaced view");
        }
        Ok(())
    }

    fn has_session(&self) -> bool {
        match current_user(self.inner.storage.as_ref()) {
            Ok(user) => user.is_some(),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable session");
                false
            }
        }
    }

    fn lock_document(&self) -> AppResult<std::sync::MutexGuard<'_, Document>> {
        self.inner.document.lock().map_err(|_| AppError::Lock("Document"))
    }

    fn lock_active(&self) -> AppResult<std::sync::MutexGuard<'_, Option<Arc<ActiveContainer<S>>>>> {
        self.inner.active.lock().map_err(|_| AppError::Lock("Router"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(Route::resolve("/"), Route::Login);
        assert_eq!(Route::resolve(paths::BILLS), Route::Bills);
        assert_eq!(Route::resolve(paths::NEW_BILL), Route::NewBill);
        assert_eq!(Route::resolve(paths::DASHBOARD), Route::Dashboard);
    }

    #[test]
    fn unknown_path_falls_back_to_not_found() {
        assert_eq!(
            Route::resolve("#employee/nowhere"),
            Route::NotFound("#employee/nowhere".to_string())
        );
    }

    #[test]
    fn path_round_trips() {
        for route in [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard] {
            assert_eq!(Route::resolve(route.path()), route);
        }
    }

    #[test]
    fn only_employee_routes_have_icons() {
        assert_eq!(Route::Bills.nav_icon(), Some(NavIcon::Window));
        assert_eq!(Route::NewBill.nav_icon(), Some(NavIcon::Mail));
        assert_eq!(Route::Dashboard.nav_icon(), None);
        assert_eq!(Route::Login.nav_icon(), None);
    }
}
