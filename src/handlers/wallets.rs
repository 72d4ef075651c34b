use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::validation;
use crate::error::{ApiResult, ErrorBody};
use crate::models::{NewWallet, Wallet, WalletId};
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[schema(example = 12345)]
    pub document_id: Option<i32>,
}

impl CreateWalletRequest {
    pub fn validate(self) -> ApiResult<NewWallet> {
        Ok(NewWallet {
            name: validation::wallet_name(self.name)?,
            document_id: validation::required(self.document_id, "documentId")?,
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateWalletRequest {
    #[schema(example = "Alice Savings")]
    pub name: Option<String>,
}

/// List all wallets
#[utoipa::path(
    get,
    path = "/wallets",
    responses(
        (status = 200, description = "All wallets by ascending id", body = [Wallet]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["wallets"],
    operation_id = "GetWallets"
)]
pub async fn list_wallets(State(state): State<AppState>) -> ApiResult<Json<Vec<Wallet>>> {
    let wallets = state.store.list_wallets().await?;
    Ok(Json(wallets))
}

/// Get wallet details
#[utoipa::path(
    get,
    path = "/wallets/{wallet_id}",
    params(("wallet_id" = i32, Path, description = "Wallet id")),
    responses(
        (status = 200, description = "The wallet", body = Wallet),
        (status = 400, description = "Malformed wallet id", body = ErrorBody),
        (status = 404, description = "Wallet not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["wallets"],
    operation_id = "GetWalletById"
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    path: Result<Path<WalletId>, PathRejection>,
) -> ApiResult<Json<Wallet>> {
    let Path(wallet_id) = path?;
    let wallet = state.store.get_wallet(wallet_id).await?;
    Ok(Json(wallet))
}

/// Create a wallet with a zero balance. Responds 201 with its location.
#[utoipa::path(
    post,
    path = "/wallets",
    request_body = CreateWalletRequest,
    responses(
        (
            status = 201,
            description = "Wallet created",
            body = Wallet,
            headers(("Location" = String, description = "Path of the new wallet"))
        ),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["wallets"],
    operation_id = "CreateWallet"
)]
pub async fn create_wallet(
    State(state): State<AppState>,
    payload: Result<Json<CreateWalletRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<Wallet>)> {
    let Json(payload) = payload?;
    let new_wallet = payload.validate()?;

    let wallet = state.store.create_wallet(new_wallet).await?;
    tracing::info!(
        wallet_id = wallet.id,
        document_id = wallet.document_id,
        "Wallet created"
    );

    let location = format!("/wallets/{}", wallet.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(wallet)))
}

/// Rename a wallet
#[utoipa::path(
    put,
    path = "/wallets/{wallet_id}",
    params(("wallet_id" = i32, Path, description = "Wallet id")),
    request_body = UpdateWalletRequest,
    responses(
        (status = 200, description = "The renamed wallet", body = Wallet),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Wallet not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["wallets"],
    operation_id = "UpdateWallet"
)]
pub async fn update_wallet(
    State(state): State<AppState>,
    path: Result<Path<WalletId>, PathRejection>,
    payload: Result<Json<UpdateWalletRequest>, JsonRejection>,
) -> ApiResult<Json<Wallet>> {
    let Path(wallet_id) = path?;
    let Json(payload) = payload?;
    let name = validation::wallet_name(payload.name)?;

    let wallet = state.store.rename_wallet(wallet_id, name).await?;
    tracing::info!(wallet_id, "Wallet renamed");

    Ok(Json(wallet))
}

/// Delete a wallet and, by cascade, its transactions
#[utoipa::path(
    delete,
    path = "/wallets/{wallet_id}",
    params(("wallet_id" = i32, Path, description = "Wallet id")),
    responses(
        (status = 204, description = "Wallet and its transactions deleted"),
        (status = 400, description = "Malformed wallet id", body = ErrorBody),
        (status = 404, description = "Wallet not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["wallets"],
    operation_id = "DeleteWallet"
)]
pub async fn delete_wallet(
    State(state): State<AppState>,
    path: Result<Path<WalletId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(wallet_id) = path?;
    state.store.delete_wallet(wallet_id).await?;
    tracing::info!(wallet_id, "Wallet deleted");

    Ok(StatusCode::NO_CONTENT)
}
