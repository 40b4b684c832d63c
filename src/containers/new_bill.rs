use std::sync::Mutex;

use tracing::{error, info, warn};

use crate::containers::{Context, DISCONNECT};
use crate::dom::EventKind;
use crate::error::{AppError, AppResult};
use crate::models::{Bill, BillDraft, BillStatus, DraftState, ReceiptFile, ReceiptUpload};
use crate::router::Route;
use crate::services::session::current_email;
use crate::services::store::BillStore;
use crate::utils::has_allowed_extension;
use crate::views::new_bill::EXPENSE_TYPES;

pub const FORM: &str = "form-new-bill";
pub const FILE_INPUT: &str = "file";
pub const INVALID_FILE_MESSAGE: &str = "Seuls les fichiers jpg, jpeg et png sont acceptés";

pub struct NewBillContainer<S: BillStore> {
    ctx: Context<S>,
    draft: Mutex<DraftState>,
}

impl<S: BillStore> NewBillContainer<S> {
    pub fn new(ctx: Context<S>) -> AppResult<Self> {
        ctx.listen(&[
            (FILE_INPUT, EventKind::Change),
            (FORM, EventKind::Submit),
            (DISCONNECT, EventKind::Click),
        ])?;
        Ok(NewBillContainer {
            ctx,
            draft: Mutex::new(DraftState::Empty),
        })
    }

    pub fn context(&self) -> &Context<S> {
        &self.ctx
    }

    pub fn state(&self) -> DraftState {
        self.draft.lock().map(|d| d.clone()).unwrap_or_default()
    }

    fn set_state(&self, state: DraftState) -> AppResult<()> {
        *self.draft.lock().map_err(|_| AppError::Lock("Draft"))? = state;
        Ok(())
    }

    /// Validates the picked receipt, then uploads it. A rejected file leaves
    /// the draft untouched and clears the input.
    pub async fn handle_change_file(&self, file: ReceiptFile) -> AppResult<()> {
        if !has_allowed_extension(&file.name, &self.ctx.settings.allowed_extensions) {
            warn!(file_name = %file.name, "receipt rejected");
            let mut document = self.ctx.document()?;
            document.clear_input(FILE_INPUT);
            document.alert(INVALID_FILE_MESSAGE);
            return Err(AppError::Validation(file.name));
        }

        let file_name = file.name.clone();
        let email = current_email(self.ctx.storage.as_ref());
        self.set_state(DraftState::Uploading {
            file_name: file_name.clone(),
        })?;

        match self.ctx.store.upload(ReceiptUpload { file, email }).await {
            Ok(stored) => {
                info!(file_name = %file_name, key = %stored.key, "receipt uploaded");
                self.set_state(DraftState::Uploaded {
                    file_name,
                    file_url: stored.file_url,
                    key: stored.key,
                })
            }
            Err(e) => {
                error!(file_name = %file_name, error = %e, "receipt upload failed");
                self.set_state(DraftState::Empty)?;
                Err(e.into())
            }
        }
    }

    /// Creates the bill from the form, then always returns to the bills list.
    pub async fn handle_submit(&self) -> AppResult<Bill> {
        let result = match self.read_form() {
            Ok(draft) => self.ctx.store.create(draft).await.map_err(AppError::from),
            Err(e) => Err(e),
        };
        match &result {
            Ok(bill) => info!(bill_id = %bill.id, "bill created"),
            Err(e) => error!(error = %e, "bill creation failed"),
        }
        self.ctx.navigator.navigate(Route::Bills);
        result
    }

    fn read_form(&self) -> AppResult<BillDraft> {
        let (file_url, file_name) = match self.state() {
            DraftState::Uploaded {
                file_url, file_name, ..
            } => (file_url, file_name),
            _ => (String::new(), String::new()),
        };
        let document = self.ctx.document()?;
        let field = |id: &str| document.input_value(id).trim().to_string();

        let expense_type = Some(field("expense-type"))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| EXPENSE_TYPES[0].to_string());
        let raw_amount = field("amount");
        let amount: f64 = match raw_amount.replace(',', ".").parse() {
            Ok(amount) => amount,
            Err(e) => {
                warn!(amount = %raw_amount, error = %e, "unreadable amount, using 0");
                0.0
            }
        };
        let pct: u32 = field("pct").parse().unwrap_or(self.ctx.settings.default_pct);

        Ok(BillDraft {
            email: current_email(self.ctx.storage.as_ref()),
            expense_type,
            name: field("expense-name"),
            amount,
            date: field("datepicker"),
            vat: field("vat"),
            pct,
            commentary: field("commentary"),
            file_url,
            file_name,
            status: BillStatus::Pending,
        })
    }
}

#[cfg(test)]
#[path = "new_bill_tests.rs"]
mod tests;
