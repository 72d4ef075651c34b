pub mod transactions;
pub mod validation;
pub mod wallets;

pub use transactions::{
    create_transaction,
    get_wallet_transaction,
    list_transactions,
    list_wallet_transactions,
    CreateTransactionRequest,
};
pub use wallets::{
    create_wallet,
    delete_wallet,
    get_wallet,
    list_wallets,
    update_wallet,
    CreateWalletRequest,
    UpdateWalletRequest,
};

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain")),
    tags = ["health"],
    operation_id = "HealthCheck"
)]
pub async fn health_check() -> &'static str {
    "OK"
}
