pub mod containers;
pub mod dom;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod settings;
pub mod utils;
pub mod views;

pub use error::{AppError, AppResult, StoreError};
pub use router::{paths, Event, Route, Router};
