use tracing::{error, info};

use crate::containers::{Context, DISCONNECT};
use crate::dom::EventKind;
use crate::error::{AppResult, StoreError};
use crate::models::Bill;
use crate::services::store::BillStore;

pub struct DashboardContainer<S: BillStore> {
    ctx: Context<S>,
}

impl<S: BillStore> DashboardContainer<S> {
    pub fn new(ctx: Context<S>) -> AppResult<Self> {
        ctx.listen(&[(DISCONNECT, EventKind::Click)])?;
        Ok(DashboardContainer { ctx })
    }

    pub fn context(&self) -> &Context<S> {
        &self.ctx
    }

    pub async fn fetch_bills(&self) -> Result<Vec<Bill>, StoreError> {
        match self.ctx.store.list().await {
            Ok(bills) => {
                info!(count = bills.len(), "dashboard bills fetched");
                Ok(bills)
            }
            Err(e) => {
                error!(error = %e, "dashboard bill list failed");
                Err(e)
            }
        }
    }
}
