//! Transfers module - deposits and withdrawals, and their conversion into
//! synthetic trades.

mod transfer_converter;
mod transfers_model;
mod transfers_traits;


pub use transfer_converter::TransferConverter;
pub use transfers_model::{DepositCostPolicy, Transfer, TransferKind, TransferStatus};
pub use transfers_traits::TransferSourceTrait;
