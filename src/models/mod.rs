use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

/// An expense bill as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: Option<u32>,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub comment_admin: Option<String>,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
    pub status: BillStatus,
}

/// A bill before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
}

impl BillDraft {
    pub fn into_bill(self, id: String) -> Bill {
        Bill {
            id,
            email: self.email,
            expense_type: self.expense_type,
            name: self.name,
            amount: self.amount,
            date: self.date,
            vat: self.vat,
            pct: Some(self.pct),
            commentary: Some(self.commentary).filter(|c| !c.is_empty()),
            comment_admin: None,
            file_url: self.file_url,
            file_name: self.file_name,
            status: self.status,
        }
    }
}

/// Display record for one row of the bills table.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub bill: Bill,
    pub display_date: String,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
}

/// A file picked in the receipt input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ReceiptFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        ReceiptFile {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    pub file: ReceiptFile,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReceipt {
    pub file_url: String,
    pub key: String,
}

/// Lifecycle of the receipt attached to the bill being written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftState {
    #[default]
    Empty,
    Uploading {
        file_name: String,
    },
    Uploaded {
        file_name: String,
        file_url: String,
        key: String,
    },
}
