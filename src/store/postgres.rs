use axum::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::{LedgerStore, RecordedTransaction, StoreError};
use crate::database::DatabasePool;
use crate::ledger;
use crate::models::{
    NewTransaction, NewWallet, Transaction, TransactionId, Wallet, WalletId,
};

/// `LedgerStore` over the `wallets` and `transactions` tables.
#[derive(Clone)]
pub struct PgLedgerStore {
    pool: DatabasePool,
}

impl PgLedgerStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn list_wallets(&self) -> Result<Vec<Wallet>, StoreError> {
        let wallets = sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, document_id, name, balance, created_at, updated_at
            FROM wallets
            ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(wallets)
    }

    async fn get_wallet(&self, id: WalletId) -> Result<Wallet, StoreError> {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT id, document_id, name, balance, created_at, updated_at
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(StoreError::WalletNotFound(id))
    }

    async fn create_wallet(&self, wallet: NewWallet) -> Result<Wallet, StoreError> {
        let created = sqlx::query_as::<_, Wallet>(
            r#"
            INSERT INTO wallets (document_id, name, balance, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NULL)
            RETURNING id, document_id, name, balance, created_at, updated_at
            "#,
        )
        .bind(wallet.document_id)
        .bind(&wallet.name)
        .bind(ledger::to_money(Decimal::ZERO))
        .bind(Utc::now())
        .fetch_one(&*self.pool)
        .await?;

        Ok(created)
    }

    async fn rename_wallet(&self, id: WalletId, name: String) -> Result<Wallet, StoreError> {
        sqlx::query_as::<_, Wallet>(
            r#"
            UPDATE wallets
            SET name = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, document_id, name, balance, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&name)
        .bind(Utc::now())
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(StoreError::WalletNotFound(id))
    }

    async fn delete_wallet(&self, id: WalletId) -> Result<(), StoreError> {
        // transactions go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM wallets WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::WalletNotFound(id));
        }
        Ok(())
    }

    async fn list_wallet_transactions(
        &self,
        wallet_id: WalletId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let wallet_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM wallets WHERE id = $1)",
        )
        .bind(wallet_id)
        .fetch_one(&*self.pool)
        .await?;

        if !wallet_exists {
            return Err(StoreError::WalletNotFound(wallet_id));
        }

        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, wallet_id, amount, type, created_at
            FROM transactions
            WHERE wallet_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(wallet_id)
        .fetch_all(&*self.pool)
        .await?;

        Ok(transactions)
    }

    async fn get_transaction(
        &self,
        wallet_id: WalletId,
        transaction_id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, wallet_id, amount, type, created_at
            FROM transactions
            WHERE wallet_id = $1 AND id = $2
            "#,
        )
        .bind(wallet_id)
        .bind(transaction_id)
        .fetch_optional(&*self.pool)
        .await?
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
        // Dropping `tx` on any early return rolls back.
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent writers on the same wallet.
        let balance = sqlx::query_scalar::<_, Decimal>(
            "SELECT balance FROM wallets WHERE id = $1 FOR UPDATE",
        )
        .bind(wallet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::WalletNotFound(wallet_id))?;

        let new_balance = ledger::apply(balance, transaction.kind, transaction.amount)?;
        let now = Utc::now();

        let wallet = sqlx::query_as::<_, Wallet>(
            r#"
            UPDATE wallets
            SET balance = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, document_id, name, balance, created_at, updated_at
            "#,
        )
        .bind(wallet_id)
        .bind(new_balance)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (wallet_id, amount, type, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, wallet_id, amount, type, created_at
            "#,
        )
        .bind(wallet_id)
        .bind(ledger::to_money(transaction.amount))
        .bind(transaction.kind.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RecordedTransaction { transaction, wallet })
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, wallet_id, amount, type, created_at
            FROM transactions
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(transactions)
    }
}
