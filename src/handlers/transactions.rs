use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use super::validation;
use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::ledger::LedgerError;
use crate::models::{NewTransaction, Transaction, TransactionId, WalletId};
use crate::store::StoreError;
use crate::AppState;

/// Body of `POST /wallets/{walletId}/transactions`. Any `walletId`, `id` or
/// `createdAt` a client sends is ignored; the server assigns them.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    #[schema(example = "100.00")]
    pub amount: Option<Decimal>,
    /// `DEPOSIT` or `WITHDRAW`.
    #[serde(rename = "type")]
    #[schema(example = "DEPOSIT")]
    pub kind: Option<String>,
}

impl CreateTransactionRequest {
    pub fn validate(self) -> ApiResult<NewTransaction> {
        Ok(NewTransaction {
            amount: validation::amount(self.amount)?,
            kind: validation::transaction_type(self.kind)?,
        })
    }
}

/// Every transaction across all wallets, newest first
#[utoipa::path(
    get,
    path = "/transactions",
    responses(
        (status = 200, description = "All transactions, newest first", body = [Transaction]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["transactions"],
    operation_id = "GetAllTransactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.store.list_transactions().await?;
    Ok(Json(transactions))
}

/// Transactions of one wallet, newest first. An existing wallet without
/// transactions yields an empty list; an unknown wallet yields 404.
#[utoipa::path(
    get,
    path = "/wallets/{wallet_id}/transactions",
    params(("wallet_id" = i32, Path, description = "Wallet id")),
    responses(
        (status = 200, description = "Wallet transactions, newest first", body = [Transaction]),
        (status = 400, description = "Malformed wallet id", body = ErrorBody),
        (status = 404, description = "Wallet not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["transactions"],
    operation_id = "GetWalletTransactions"
)]
pub async fn list_wallet_transactions(
    State(state): State<AppState>,
    path: Result<Path<WalletId>, PathRejection>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let Path(wallet_id) = path?;
    let transactions = state.store.list_wallet_transactions(wallet_id).await?;
    Ok(Json(transactions))
}

#[utoipa::path(
    get,
    path = "/wallets/{wallet_id}/transactions/{transaction_id}",
    params(
        ("wallet_id" = i32, Path, description = "Wallet id"),
        ("transaction_id" = i32, Path, description = "Transaction id")
    ),
    responses(
        (status = 200, description = "The transaction", body = Transaction),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Transaction not found for this wallet", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["transactions"],
    operation_id = "GetWalletTransaction"
)]
pub async fn get_wallet_transaction(
    State(state): State<AppState>,
    path: Result<Path<(WalletId, TransactionId)>, PathRejection>,
) -> ApiResult<Json<Transaction>> {
    let Path((wallet_id, transaction_id)) = path?;
    let transaction = state.store.get_transaction(wallet_id, transaction_id).await?;
    Ok(Json(transaction))
}

/// Record a deposit or withdrawal and update the wallet balance.
#[utoipa::path(
    post,
    path = "/wallets/{wallet_id}/transactions",
    params(("wallet_id" = i32, Path, description = "Wallet id")),
    request_body = CreateTransactionRequest,
    responses(
        (
            status = 201,
            description = "Transaction recorded and balance updated",
            body = Transaction,
            headers(("Location" = String, description = "Path of the new transaction"))
        ),
        (status = 400, description = "Invalid request or insufficient funds", body = ErrorBody),
        (status = 404, description = "Wallet not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["transactions"],
    operation_id = "CreateTransaction"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    path: Result<Path<WalletId>, PathRejection>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<Transaction>)> {
    let Path(wallet_id) = path?;
    let Json(payload) = payload?;
    let new_transaction = payload.validate()?;

    let recorded = state
        .store
        .record_transaction(wallet_id, new_transaction)
        .await
        .map_err(|e| {
            if let StoreError::Ledger(LedgerError::InsufficientFunds { balance, requested }) = &e {
                tracing::warn!(
                    wallet_id,
                    %balance,
                    %requested,
                    "Withdrawal rejected: insufficient funds"
                );
            }
            ApiError::from(e)
        })?;

    let transaction = recorded.transaction;
    tracing::info!(
        wallet_id,
        transaction_id = transaction.id,
        kind = %transaction.kind,
        amount = %transaction.amount,
        balance = %recorded.wallet.balance,
        "Transaction recorded"
    );

    let location = format!("/wallets/{}/transactions/{}", wallet_id, transaction.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(transaction)))
}
