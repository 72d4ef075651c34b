//! OpenAPI document for the HTTP API.
//!
//! [`ApiDoc`] lists every route handler and the JSON shapes they exchange.
//! The router serves it at `/api-docs/openapi.json` with Swagger UI under
//! `/swagger-ui`.

use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers::{CreateTransactionRequest, CreateWalletRequest, UpdateWalletRequest};
use crate::models::{Transaction, TransactionType, Wallet};

/// Path of the generated OpenAPI JSON.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Path prefix of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wallet ledger API",
        description = "Wallets with a running balance and their deposit and withdrawal history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::handlers::health_check,
        crate::handlers::wallets::list_wallets,
        crate::handlers::wallets::get_wallet,
        crate::handlers::wallets::create_wallet,
        crate::handlers::wallets::update_wallet,
        crate::handlers::wallets::delete_wallet,
        crate::handlers::transactions::list_wallet_transactions,
        crate::handlers::transactions::get_wallet_transaction,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::list_transactions,
    ),
    components(schemas(
        Wallet,
        Transaction,
        TransactionType,
        CreateWalletRequest,
        UpdateWalletRequest,
        CreateTransactionRequest,
        ErrorBody,
    )),
    tags(
        (name = "wallets", description = "Wallet creation, lookup and renaming"),
        (name = "transactions", description = "Deposits and withdrawals"),
        (name = "health", description = "Liveness check")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    fn assert_object_schema_has_fields(schema: &RefOr<Schema>, fields: &[&str]) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                for field in fields {
                    assert!(
                        obj.properties.contains_key(*field),
                        "schema should have field '{field}'"
                    );
                }
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn wallet_schema_uses_json_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;

        assert_object_schema_has_fields(
            schemas.get("Wallet").expect("Wallet schema"),
            &["id", "documentId", "name", "balance", "createdAt", "updatedAt"],
        );
        assert_object_schema_has_fields(
            schemas.get("Transaction").expect("Transaction schema"),
            &["id", "walletId", "amount", "type", "createdAt"],
        );
        assert_object_schema_has_fields(
            schemas.get("CreateTransactionRequest").expect("request schema"),
            &["amount", "type"],
        );
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let mut paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        paths.sort_unstable();

        assert_eq!(
            paths,
            vec![
                "/health",
                "/transactions",
                "/wallets",
                "/wallets/{wallet_id}",
                "/wallets/{wallet_id}/transactions",
                "/wallets/{wallet_id}/transactions/{transaction_id}",
            ]
        );
    }
}
