use tracing::{error, info, warn};

use crate::containers::{Context, DISCONNECT};
use crate::dom::{Element, EventKind, Modal};
use crate::error::{AppResult, StoreError};
use crate::models::BillRow;
use crate::router::Route;
use crate::services::session::current_email;
use crate::services::store::BillStore;
use crate::utils::{format_date, format_status};
use crate::views::bills::receipt_modal_body;

pub const NEW_BILL_BUTTON: &str = "btn-new-bill";
pub const EYE_ICON: &str = "icon-eye";

pub struct BillsContainer<S: BillStore> {
    ctx: Context<S>,
}

impl<S: BillStore> BillsContainer<S> {
    pub fn new(ctx: Context<S>) -> AppResult<Self> {
        ctx.listen(&[
            (NEW_BILL_BUTTON, EventKind::Click),
            (EYE_ICON, EventKind::Click),
            (DISCONNECT, EventKind::Click),
        ])?;
        Ok(BillsContainer { ctx })
    }

    pub fn context(&self) -> &Context<S> {
        &self.ctx
    }

    /// Loads the signed-in employee's bills and prepares them for display,
    /// in store order.
    pub async fn fetch_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let bills = self.ctx.store.list().await.map_err(|e| {
            error!(error = %e, "bill list failed");
            e
        })?;
        let email = current_email(self.ctx.storage.as_ref());
        let total = bills.len();
        let bills: Vec<_> = bills.into_iter().filter(|b| b.email == email).collect();
        info!(count = bills.len(), total, email = %email, "bills fetched");

        Ok(bills
            .into_iter()
            .map(|bill| {
                let display_date = match format_date(&bill.date) {
                    Ok(formatted) => formatted,
                    Err(e) => {
                        warn!(bill_id = %bill.id, date = %bill.date, error = %e, "keeping raw date");
                        bill.date.clone()
                    }
                };
                BillRow {
                    display_date,
                    status_label: format_status(bill.status),
                    bill,
                }
            })
            .collect())
    }

    pub fn handle_click_new_bill(&self) {
        self.ctx.navigator.navigate(Route::NewBill);
    }

    pub fn handle_click_icon_eye(&self, icon: &Element) -> AppResult<()> {
        let image_url = icon
            .attr("data-bill-url")
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != "null")
            .map(str::to_string);
        let image_width = self.ctx.settings.receipt_image_width();
        let html = receipt_modal_body(image_url.as_deref(), image_width).into_string();
        self.ctx.document()?.open_modal(Modal {
            image_url,
            image_width,
            html,
        });
        Ok(())
    }
}
