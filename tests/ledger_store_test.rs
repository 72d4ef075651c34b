// Integration tests for the LedgerStore implementations
// These tests verify:
// 1. Wallets start at zero and get generated ids
// 2. Deposits and withdrawals persist together with the balance change
// 3. Rejected withdrawals leave balance and history untouched
// 4. Concurrent withdrawals never overdraw a wallet
// 5. Deleting a wallet cascades to its transactions
//
// Postgres tests are ignored by default - they require TEST_DATABASE_URL.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wallet_ledger_api::ledger::LedgerError;
use wallet_ledger_api::models::{NewTransaction, NewWallet, TransactionType};
use wallet_ledger_api::store::{LedgerStore, MemoryLedgerStore, StoreError};

use test_helpers::*;

fn new_wallet(name: &str) -> NewWallet {
    NewWallet {
        name: name.to_string(),
        document_id: 1,
    }
}

fn deposit(amount: Decimal) -> NewTransaction {
    NewTransaction {
        kind: TransactionType::Deposit,
        amount,
    }
}

fn withdraw(amount: Decimal) -> NewTransaction {
    NewTransaction {
        kind: TransactionType::Withdraw,
        amount,
    }
}

/// Ten withdrawals of 20 race against a balance of 100: exactly five may win.
async fn assert_concurrent_withdrawals_never_overdraw(store: Arc<dyn LedgerStore>) {
    let wallet = store.create_wallet(new_wallet("Race")).await.unwrap();
    store
        .record_transaction(wallet.id, deposit(dec!(100)))
        .await
        .unwrap();

    let wallet_id = wallet.id;
    let mut handles = Vec::new();
    for _ in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.record_transaction(wallet_id, withdraw(dec!(20))).await
        }));
    }

    let mut succeeded = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(StoreError::Ledger(LedgerError::InsufficientFunds { .. })) => rejected += 1,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    assert_eq!(succeeded, 5);
    assert_eq!(rejected, 5);
    let wallet = store.get_wallet(wallet_id).await.unwrap();
    assert_eq!(wallet.balance, Decimal::ZERO);
    let history = store.list_wallet_transactions(wallet_id).await.unwrap();
    assert_eq!(history.len(), 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_memory_concurrent_withdrawals_never_overdraw() {
    assert_concurrent_withdrawals_never_overdraw(Arc::new(MemoryLedgerStore::new())).await;
}

#[tokio::test]
async fn test_memory_rename_keeps_balance() {
    let store = MemoryLedgerStore::new();
    let wallet = store.create_wallet(new_wallet("Alice")).await.unwrap();
    store.record_transaction(wallet.id, deposit(dec!(12.5))).await.unwrap();

    let renamed = store
        .rename_wallet(wallet.id, "Alice Main".to_string())
        .await
        .unwrap();

    assert_eq!(renamed.name, "Alice Main");
    assert_eq!(renamed.balance, dec!(12.50));
    assert!(matches!(
        store.rename_wallet(999, "Ghost".to_string()).await,
        Err(StoreError::WalletNotFound(999))
    ));
}

#[tokio::test]
#[ignore] // Ignore by default - requires test database
async fn test_pg_create_wallet_starts_at_zero() {
    let pool = setup_test_db().await;
    let store = pg_store(&pool);

    let wallet = store.create_wallet(new_wallet("Alice")).await.unwrap();

    assert!(wallet.id > 0);
    assert_eq!(wallet.balance, Decimal::ZERO);
    assert_eq!(wallet.balance.to_string(), "0.00");
    assert!(wallet.updated_at.is_none());
}

#[tokio::test]
#[ignore]
async fn test_pg_deposit_and_withdraw_update_balance() {
    let pool = setup_test_db().await;
    let store = pg_store(&pool);
    let wallet_id = create_test_wallet(&pool, "Alice", Decimal::ZERO).await;

    let recorded = store
        .record_transaction(wallet_id, deposit(dec!(100)))
        .await
        .unwrap();
    assert_eq!(recorded.wallet.balance, dec!(100));
    assert_eq!(recorded.transaction.wallet_id, wallet_id);
    assert!(recorded.wallet.updated_at.is_some());

    store
        .record_transaction(wallet_id, withdraw(dec!(50)))
        .await
        .unwrap();

    assert_eq!(get_wallet_balance(&pool, wallet_id).await, dec!(50));
    assert_eq!(count_transactions(&pool, wallet_id).await, 2);
}

#[tokio::test]
#[ignore]
async fn test_pg_insufficient_funds_rolls_back() {
    let pool = setup_test_db().await;
    let store = pg_store(&pool);
    let wallet_id = create_test_wallet(&pool, "Alice", dec!(100)).await;

    let err = store
        .record_transaction(wallet_id, withdraw(dec!(150)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Ledger(LedgerError::InsufficientFunds { .. })
    ));
    assert_eq!(get_wallet_balance(&pool, wallet_id).await, dec!(100));
    assert_eq!(count_transactions(&pool, wallet_id).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_pg_unknown_wallet_is_not_found() {
    let pool = setup_test_db().await;
    let store = pg_store(&pool);

    assert!(matches!(
        store.record_transaction(999_999, deposit(dec!(1))).await,
        Err(StoreError::WalletNotFound(999_999))
    ));
    assert!(matches!(
        store.list_wallet_transactions(999_999).await,
        Err(StoreError::WalletNotFound(999_999))
    ));
}

#[tokio::test]
#[ignore]
async fn test_pg_history_is_newest_first() {
    let pool = setup_test_db().await;
    let store = pg_store(&pool);
    let wallet_id = create_test_wallet(&pool, "Alice", Decimal::ZERO).await;

    for amount in [dec!(1), dec!(2), dec!(3)] {
        store.record_transaction(wallet_id, deposit(amount)).await.unwrap();
    }

    let history = store.list_wallet_transactions(wallet_id).await.unwrap();
    let amounts: Vec<Decimal> = history.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec!(3), dec!(2), dec!(1)]);
}

#[tokio::test]
#[ignore]
async fn test_pg_delete_wallet_cascades() {
    let pool = setup_test_db().await;
    let store = pg_store(&pool);
    let wallet_id = create_test_wallet(&pool, "Alice", Decimal::ZERO).await;
    store.record_transaction(wallet_id, deposit(dec!(10))).await.unwrap();
    store.record_transaction(wallet_id, withdraw(dec!(4))).await.unwrap();

    store.delete_wallet(wallet_id).await.unwrap();

    assert_eq!(count_transactions(&pool, wallet_id).await, 0);
    assert!(matches!(
        store.get_wallet(wallet_id).await,
        Err(StoreError::WalletNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn test_pg_concurrent_withdrawals_never_overdraw() {
    let pool = setup_test_db().await;
    assert_concurrent_withdrawals_never_overdraw(Arc::new(pg_store(&pool))).await;
}
