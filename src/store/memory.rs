use std::collections::BTreeMap;

use axum::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::{newest_first, LedgerStore, RecordedTransaction, StoreError};
use crate::ledger;
use crate::models::{
    NewTransaction, NewWallet, Transaction, TransactionId, Wallet, WalletId,
};

/// In-process `LedgerStore`. One mutex guards all state, so every write is
/// serialized the same way the Postgres store serializes per wallet.
#[derive(Default)]
pub struct MemoryLedgerStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    wallets: BTreeMap<WalletId, Wallet>,
    transactions: Vec<Transaction>,
    last_wallet_id: WalletId,
    last_transaction_id: TransactionId,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryState {
    fn wallet_mut(&mut self, id: WalletId) -> Result<&mut Wallet, StoreError> {
        self.wallets
            .get_mut(&id)
            .ok_or(StoreError::WalletNotFound(id))
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn list_wallets(&self) -> Result<Vec<Wallet>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.wallets.values().cloned().collect())
    }

    async fn get_wallet(&self, id: WalletId) -> Result<Wallet, StoreError> {
        let state = self.state.lock().await;
        state
            .wallets
            .get(&id)
            .cloned()
            .ok_or(StoreError::WalletNotFound(id))
    }

    async fn create_wallet(&self, wallet: NewWallet) -> Result<Wallet, StoreError> {
        let mut state = self.state.lock().await;
        state.last_wallet_id += 1;

        let created = Wallet {
            id: state.last_wallet_id,
            document_id: wallet.document_id,
            name: wallet.name,
            balance: ledger::to_money(Decimal::ZERO),
            created_at: Utc::now(),
            updated_at: None,
        };
        state.wallets.insert(created.id, created.clone());

        Ok(created)
    }

    async fn rename_wallet(&self, id: WalletId, name: String) -> Result<Wallet, StoreError> {
        let mut state = self.state.lock().await;
        let wallet = state.wallet_mut(id)?;
        wallet.name = name;
        wallet.updated_at = Some(Utc::now());
        Ok(wallet.clone())
    }

    async fn delete_wallet(&self, id: WalletId) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if state.wallets.remove(&id).is_none() {
            return Err(StoreError::WalletNotFound(id));
        }
        state.transactions.retain(|t| t.wallet_id != id);
        Ok(())
    }

    async fn list_wallet_transactions(
        &self,
        wallet_id: WalletId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.lock().await;
        if !state.wallets.contains_key(&wallet_id) {
            return Err(StoreError::WalletNotFound(wallet_id));
        }

        let mut transactions: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|t| t.wallet_id == wallet_id)
            .cloned()
            .collect();
        transactions.sort_by(newest_first);

        Ok(transactions)
    }

    async fn get_transaction(
        &self,
        wallet_id: WalletId,
        transaction_id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        let state = self.state.lock().await;
        state
            .transactions
            .iter()
            .find(|t| t.wallet_id == wallet_id && t.id == transaction_id)
            .cloned()
            .ok_or(StoreError::TransactionNotFound {
                wallet_id,
                transaction_id,
            })
    }

    async fn record_transaction(
        &self,
        wallet_id: WalletId,
        transaction: NewTransaction,
    ) -> Result<RecordedTransaction, StoreError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();

        let wallet = state.wallet_mut(wallet_id)?;
        wallet.balance = ledger::apply(wallet.balance, transaction.kind, transaction.amount)?;
        wallet.updated_at = Some(now);
        let wallet = wallet.clone();

        state.last_transaction_id += 1;
        let recorded = Transaction {
            id: state.last_transaction_id,
            wallet_id,
            amount: ledger::to_money(transaction.amount),
            kind: transaction.kind,
            created_at: now,
        };
        state.transactions.push(recorded.clone());

        Ok(RecordedTransaction {
            transaction: recorded,
            wallet,
        })
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.lock().await;
        let mut transactions = state.transactions.clone();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }
}
