//! Entity stores: customers, schedules and reports
//!
//! Each submodule adds its actions to [`Console`](crate::Console). Actions
//! always re-fetch from the backend after a successful mutation; nothing is
//! merged locally.

mod customers;
mod reports;
mod schedules;
mod state;
mod types;

pub use reports::REPORT_PDF_PATH;
pub use state::*;
pub use types::*;
