//! Persistence context for wallets and their transactions.
//!
//! Handlers reach the store only through [`LedgerStore`], injected via
//! `AppState`. `PgLedgerStore` is the production implementation;
//! `MemoryLedgerStore` backs tests and `serve --in-memory`.

use std::cmp::Ordering;

use axum::async_trait;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::models::{
    NewTransaction, NewWallet, Transaction, TransactionId, Wallet, WalletId,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryLedgerStore;
pub use postgres::PgLedgerStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Wallet {0} not found")]
    WalletNotFound(WalletId),
    #[error("Transaction {transaction_id} not found in wallet {wallet_id}")]
    TransactionNotFound {
        wallet_id: WalletId,
        transaction_id: TransactionId,
    },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of recording a transaction: the new row and the wallet after the
/// balance change.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTransaction {
    pub transaction: Transaction,
    pub wallet: Wallet,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// All wallets, ordered by id.
    async fn list_wallets(&self) -> Result<Vec<Wallet>, StoreError>;

    async fn get_wallet(&self, id: WalletId) -> Result<Wallet, StoreError>;

    /// Insert a wallet with a zero balance and a server-assigned `created_at`.
    async fn create_wallet(&self, wallet: NewWallet) -> Result<Wallet, StoreError>;

    async fn rename_wallet(&self, id: WalletId, name: String) -> Result<Wallet, StoreError>;

    /// Delete a wallet together with all of its transactions.
    async fn delete_wallet(&self, id: WalletId) -> Result<(), StoreError>;

    /// Transactions of one wallet, newest first. Fails with
    /// [`StoreError::WalletNotFound`] when the wallet does not exist.
    async fn list_wallet_transactions(
        &self,
        wallet_id: WalletId,
    ) -> Result<Vec<Transaction>, StoreError>;

    async fn get_transaction(
        &self,
        wallet_id: WalletId,
        transaction_id: TransactionId,
    ) -> Result<Transaction, StoreError>;

    /// Apply the balance rule and persist the wallet change and the
    /// transaction row as one unit. Nothing is written when the rule rejects.
    async fn record_transaction(
        &self,
        wallet_id: WalletId,
        transaction: NewTransaction,
    ) -> Result<RecordedTransaction, StoreError>;

    /// Every transaction across all wallets, newest first.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
}

/// History order: `created_at` descending, id descending on ties.
pub(crate) fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}
