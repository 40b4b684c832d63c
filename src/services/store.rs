use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::models::{Bill, BillDraft, ReceiptUpload, StoredReceipt};
use crate::utils::sha256_hex;

const FIXTURES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/bills.json"));

/// Remote persistence for bills.
pub trait BillStore: Send + Sync + 'static {
    fn list(&self) -> impl Future<Output = Result<Vec<Bill>, StoreError>> + Send;

    fn create(&self, draft: BillDraft) -> impl Future<Output = Result<Bill, StoreError>> + Send;

    fn update(&self, bill: Bill) -> impl Future<Output = Result<Bill, StoreError>> + Send;

    fn upload(
        &self,
        upload: ReceiptUpload,
    ) -> impl Future<Output = Result<StoredReceipt, StoreError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Create,
    Update,
    Upload,
}

/// In-process store seeded from fixtures. Failures can be queued per
/// operation and are consumed by the next matching call.
#[derive(Default)]
pub struct MemoryStore {
    bills: Mutex<Vec<Bill>>,
    failures: Mutex<VecDeque<(StoreOp, StoreError)>>,
    calls: Mutex<Vec<StoreOp>>,
}

impl MemoryStore {
    pub fn new(bills: Vec<Bill>) -> Self {
        MemoryStore {
            bills: Mutex::new(bills),
            ..Default::default()
        }
    }

    pub fn with_fixtures() -> Result<Self, serde_json::Error> {
        Ok(Self::new(fixture_bills()?))
    }

    pub fn fail_next(&self, op: StoreOp, error: StoreError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push_back((op, error));
        }
    }

    pub fn calls(&self, op: StoreOp) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|c| **c == op).count())
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> Vec<Bill> {
        self.bills.lock().map(|b| b.clone()).unwrap_or_default()
    }

    fn begin(&self, op: StoreOp) -> Result<(), StoreError> {
        self.calls
            .lock()
            .map_err(|_| StoreError::new("Store lock"))?
            .push(op);
        let mut failures = self.failures.lock().map_err(|_| StoreError::new("Store lock"))?;
        match failures.iter().position(|(o, _)| *o == op) {
            Some(index) => match failures.remove(index) {
                Some((_, error)) => Err(error),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

impl BillStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.begin(StoreOp::List)?;
        Ok(self.snapshot())
    }

    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        self.begin(StoreOp::Create)?;
        let bill = draft.into_bill(uuid::Uuid::new_v4().to_string());
        self.bills
            .lock()
            .map_err(|_| StoreError::new("Store lock"))?
            .push(bill.clone());
        Ok(bill)
    }

    async fn update(&self, bill: Bill) -> Result<Bill, StoreError> {
        self.begin(StoreOp::Update)?;
        let mut bills = self.bills.lock().map_err(|_| StoreError::new("Store lock"))?;
        let slot = bills
            .iter_mut()
            .find(|b| b.id == bill.id)
            .ok_or_else(|| StoreError::new("Erreur 404"))?;
        *slot = bill.clone();
        Ok(bill)
    }

    async fn upload(&self, upload: ReceiptUpload) -> Result<StoredReceipt, StoreError> {
        self.begin(StoreOp::Upload)?;
        let key = sha256_hex(&upload.file.bytes);
        Ok(StoredReceipt {
            file_url: format!("https://receipts.billed.local/{}/{}", key, upload.file.name),
            key,
        })
    }
}

pub fn fixture_bills() -> Result<Vec<Bill>, serde_json::Error> {
    serde_json::from_str(FIXTURES)
}
