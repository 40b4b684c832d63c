//! Bills page driven through the router, the way the browser would.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Notify;

use billed::dom::NavIcon;
use billed::models::{Bill, BillDraft, BillStatus, ReceiptUpload, StoredReceipt, User, UserType};
use billed::services::session::{MemoryStorage, SessionStorage, USER_KEY};
use billed::services::store::{BillStore, MemoryStore, StoreOp};
use billed::settings::Settings;
use billed::{paths, Event, Router, StoreError};

fn employee() -> Arc<MemoryStorage> {
    Arc::new(
        MemoryStorage::with_user(&User {
            user_type: UserType::Employee,
            email: "a@a".into(),
        })
        .unwrap(),
    )
}

fn router(store: MemoryStore) -> Router<MemoryStore> {
    Router::new(store, employee(), Settings::default())
}

fn dates(router: &Router<impl BillStore>) -> Vec<String> {
    let document = router.document();
    let document = document.lock().unwrap();
    document
        .query_all("bill-date")
        .into_iter()
        .filter_map(|e| e.attr("data-date").map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_bills_icon_is_highlighted() -> Result<()> {
    let router = router(MemoryStore::with_fixtures()?);
    router.on_navigate(paths::BILLS).await?;

    let document = router.document();
    let document = document.lock().unwrap();
    let window = document.query("icon-window").unwrap();
    assert!(window.has_class("active-icon"));
    assert_eq!(document.active_icons(), vec![NavIcon::Window]);
    Ok(())
}

#[tokio::test]
async fn test_bills_are_fetched_and_ordered_most_recent_first() -> Result<()> {
    let router = router(MemoryStore::with_fixtures()?);
    router.on_navigate(paths::BILLS).await?;

    assert_eq!(
        dates(&router),
        vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]
    );
    let document = router.document();
    let document = document.lock().unwrap();
    assert!(document.query("tbody").is_some());
    assert!(document.contains_text("Mes notes de frais"));
    assert!(document.contains_text("4 Avr. 04"));
    assert!(document.contains_text("Refusé"));
    Ok(())
}

#[tokio::test]
async fn test_example_dates_render_in_descending_order() -> Result<()> {
    let bills: Vec<Bill> = MemoryStore::with_fixtures()?
        .snapshot()
        .into_iter()
        .filter(|b| b.date != "2002-02-02")
        .collect();
    let router = router(MemoryStore::new(bills));
    router.on_navigate(paths::BILLS).await?;
    assert_eq!(dates(&router), vec!["2004-04-04", "2003-03-03", "2001-01-01"]);
    Ok(())
}

fn bill(email: &str, name: &str, date: &str) -> Bill {
    Bill {
        id: name.into(),
        email: email.into(),
        expense_type: "Transports".into(),
        name: name.into(),
        amount: 10.0,
        date: date.into(),
        vat: "2".into(),
        pct: Some(20),
        commentary: None,
        comment_admin: None,
        file_url: String::new(),
        file_name: String::new(),
        status: BillStatus::Pending,
    }
}

#[tokio::test]
async fn test_datetime_dates_are_ordered_by_day() -> Result<()> {
    let router = router(MemoryStore::new(vec![
        bill("a@a", "older", "2001-01-01"),
        bill("a@a", "newer", "2005-06-07T10:00:00"),
    ]));
    router.on_navigate(paths::BILLS).await?;

    let dates = dates(&router);
    assert_eq!(dates, vec!["2005-06-07T10:00:00", "2001-01-01"]);
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    assert!(router.document().lock().unwrap().contains_text("7 Jui. 05"));
    Ok(())
}

#[tokio::test]
async fn test_other_employees_bills_are_hidden() -> Result<()> {
    let router = router(MemoryStore::new(vec![
        bill("a@a", "name-mine", "2020-01-01"),
        bill("b@b", "name-theirs", "2021-01-01"),
    ]));
    router.on_navigate(paths::BILLS).await?;

    let document = router.document();
    let document = document.lock().unwrap();
    assert!(document.contains_text("name-mine"));
    assert!(!document.contains_text("name-theirs"));
    assert_eq!(document.query_all("icon-eye").len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_lists_every_employee() -> Result<()> {
    let router = router(MemoryStore::new(vec![
        bill("a@a", "name-mine", "2020-01-01"),
        bill("b@b", "name-theirs", "2021-01-01"),
    ]));
    router.on_navigate(paths::DASHBOARD).await?;

    let document = router.document();
    let document = document.lock().unwrap();
    assert!(document.contains_text("name-mine"));
    assert!(document.contains_text("name-theirs"));
    assert!(document.contains_text("En attente (2)"));
    Ok(())
}

#[tokio::test]
async fn test_list_errors_are_displayed() -> Result<()> {
    for (path, message) in [
        (paths::BILLS, "Erreur 404"),
        (paths::BILLS, "Erreur 500"),
        (paths::DASHBOARD, "Erreur 404"),
        (paths::DASHBOARD, "Erreur 500"),
    ] {
        let store = MemoryStore::with_fixtures()?;
        store.fail_next(StoreOp::List, StoreError::new(message));
        let router = router(store);
        router.on_navigate(path).await?;

        let document = router.document();
        let document = document.lock().unwrap();
        assert!(document.contains_text(message), "{} on {}", message, path);
        assert_eq!(document.query("error-message").unwrap().text, message);
    }
    Ok(())
}

#[tokio::test]
async fn test_new_bill_button_opens_form() -> Result<()> {
    let router = router(MemoryStore::with_fixtures()?);
    router.on_navigate(paths::BILLS).await?;

    assert!(router.dispatch(Event::ClickNewBill).await?);

    let document = router.document();
    let document = document.lock().unwrap();
    assert!(document.contains_text("Envoyer"));
    assert!(document.query("form-new-bill").is_some());
    assert_eq!(document.active_icons(), vec![NavIcon::Mail]);
    Ok(())
}

#[tokio::test]
async fn test_eye_icons_open_receipt() -> Result<()> {
    let router = router(MemoryStore::with_fixtures()?);
    router.on_navigate(paths::BILLS).await?;
    let count = router.document().lock().unwrap().query_all("icon-eye").len();
    assert_eq!(count, 4);

    for index in 0..count {
        assert!(router.dispatch(Event::ClickEyeIcon(index)).await?);
        let document = router.document();
        let document = document.lock().unwrap();
        let expected = document.query_all("icon-eye")[index]
            .attr("data-bill-url")
            .map(str::to_string);
        let modal = document.modal().unwrap();
        assert_eq!(modal.image_url, expected);
        assert_eq!(modal.image_width, 500);
    }
    Ok(())
}

#[tokio::test]
async fn test_listeners_are_dropped_with_their_view() -> Result<()> {
    let router = router(MemoryStore::with_fixtures()?);
    router.on_navigate(paths::BILLS).await?;
    router.on_navigate(paths::NEW_BILL).await?;

    assert!(!router.dispatch(Event::ClickEyeIcon(0)).await?);
    assert!(!router.dispatch(Event::ClickNewBill).await?);
    assert!(router.document().lock().unwrap().modal().is_none());
    Ok(())
}

#[tokio::test]
async fn test_unknown_path_renders_not_found() -> Result<()> {
    let router = router(MemoryStore::with_fixtures()?);
    router.on_navigate("#employee/unknown").await?;

    let document = router.document();
    let document = document.lock().unwrap();
    assert!(document.contains_text("Page introuvable"));
    assert!(document.active_icons().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_session_shows_login() -> Result<()> {
    let router = Router::new(
        MemoryStore::with_fixtures()?,
        Arc::new(MemoryStorage::default()),
        Settings::default(),
    );
    router.on_navigate(paths::BILLS).await?;

    assert_eq!(router.store().calls(StoreOp::List), 0);
    assert!(router.document().lock().unwrap().query("form-employee").is_some());
    Ok(())
}

#[tokio::test]
async fn test_disconnect_clears_session() -> Result<()> {
    let storage = employee();
    let router = Router::new(MemoryStore::with_fixtures()?, storage.clone(), Settings::default());
    router.on_navigate(paths::BILLS).await?;

    assert!(router.dispatch(Event::Disconnect).await?);

    assert_eq!(storage.get_item(USER_KEY), None);
    assert!(router.document().lock().unwrap().query("form-admin").is_some());
    Ok(())
}

/// Holds every `list` call until the gate opens.
struct GatedStore {
    inner: MemoryStore,
    gate: Arc<Notify>,
}

impl BillStore for GatedStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.gate.notified().await;
        self.inner.list().await
    }

    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        self.inner.create(draft).await
    }

    async fn update(&self, bill: Bill) -> Result<Bill, StoreError> {
        self.inner.update(bill).await
    }

    async fn upload(&self, upload: ReceiptUpload) -> Result<StoredReceipt, StoreError> {
        self.inner.upload(upload).await
    }
}

#[tokio::test]
async fn test_late_list_response_does_not_overwrite_new_view() -> Result<()> {
    let gate = Arc::new(Notify::new());
    let store = GatedStore {
        inner: MemoryStore::with_fixtures()?,
        gate: gate.clone(),
    };
    let router = Router::new(store, employee(), Settings::default());

    let slow = router.on_navigate(paths::BILLS);
    let fast = async {
        tokio::task::yield_now().await;
        router.on_navigate(paths::NEW_BILL).await?;
        gate.notify_one();
        anyhow::Ok(())
    };
    let (slow, fast) = tokio::join!(slow, fast);
    slow?;
    fast?;

    let document = router.document();
    let document = document.lock().unwrap();
    assert!(document.contains_text("Envoyer une note de frais"));
    assert!(!document.contains_text("Mes notes de frais"));
    assert_eq!(document.active_icons(), vec![NavIcon::Mail]);
    Ok(())
}
