//! Pure renderers from data to HTML fragments.

pub mod bills;
pub mod dashboard;
pub mod layout;
pub mod login;
pub mod new_bill;
