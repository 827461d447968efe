pub mod codec;
pub mod config;
pub mod error;
pub mod ledger;

pub use error::{Error, Result};
pub use ledger::Ledger;
