//! Shared types: wallets, transactions, ID aliases. Timestamps are chrono
//! `DateTime<Utc>`, money is `rust_decimal::Decimal`.

pub mod ids;
pub mod transaction;
pub mod wallet;

pub use ids::{TransactionId, WalletId};
pub use transaction::{NewTransaction, Transaction, TransactionType, UnknownTransactionType};
pub use wallet::{NewWallet, Wallet};
