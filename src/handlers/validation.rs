//! Guard clauses for request bodies. Each returns `ApiError::Validation`
//! naming the field that failed.

use rust_decimal::Decimal;

use crate::error::{ApiError, ApiResult};
use crate::ledger::{self, MAX_MONEY, MONEY_SCALE};
use crate::models::TransactionType;

pub const MAX_WALLET_NAME_LEN: usize = 100;

pub fn required<T>(value: Option<T>, field: &'static str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::validation(field, format!("{} is required", field)))
}

/// Trimmed, non-blank wallet name of at most 100 characters.
pub fn wallet_name(name: Option<String>) -> ApiResult<String> {
    let name = required(name, "name")?;
    let name = name.trim();

    if name.is_empty() {
        return Err(ApiError::validation("name", "name must not be blank"));
    }
    if name.chars().count() > MAX_WALLET_NAME_LEN {
        return Err(ApiError::validation(
            "name",
            format!("name must be at most {} characters", MAX_WALLET_NAME_LEN),
        ));
    }

    Ok(name.to_string())
}

/// Non-negative amount with at most two decimal places that fits the money columns.
pub fn amount(amount: Option<Decimal>) -> ApiResult<Decimal> {
    let amount = required(amount, "amount")?;

    if amount < Decimal::ZERO {
        return Err(ApiError::validation("amount", "amount must not be negative"));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(ApiError::validation(
            "amount",
            format!("amount must have at most {} decimal places", MONEY_SCALE),
        ));
    }
    if amount > MAX_MONEY {
        return Err(ApiError::validation(
            "amount",
            format!("amount must not exceed {}", MAX_MONEY),
        ));
    }

    Ok(ledger::to_money(amount))
}

pub fn transaction_type(kind: Option<String>) -> ApiResult<TransactionType> {
    let kind = required(kind, "type")?;
    kind.parse().map_err(|_| {
        ApiError::validation(
            "type",
            format!("type must be DEPOSIT or WITHDRAW, got {:?}", kind),
        )
    })
}
