//! Balance-mutation rule applied when a transaction is recorded.
//!
//! Money columns are `NUMERIC(18,2)`: every balance leaving this module has
//! scale 2 and stays within [`MAX_MONEY`].

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TransactionType;

/// Number of decimal places stored for any amount or balance.
pub const MONEY_SCALE: u32 = 2;

/// Largest value a `NUMERIC(18,2)` column holds: 9999999999999999.99.
pub const MAX_MONEY: Decimal = Decimal::from_parts(0xA763_FFFF, 0x0DE0_B6B3, 0, false, MONEY_SCALE);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Insufficient funds")]
    InsufficientFunds { balance: Decimal, requested: Decimal },
    #[error("Balance would exceed the maximum of {}", MAX_MONEY)]
    BalanceOverflow,
}

/// Rescale a value to the stored money scale, e.g. `100` becomes `100.00`.
pub fn to_money(mut value: Decimal) -> Decimal {
    value.rescale(MONEY_SCALE);
    value
}

/// Balance after applying `amount` of `kind` to `balance`.
///
/// Withdrawals never take the balance below zero.
pub fn apply(
    balance: Decimal,
    kind: TransactionType,
    amount: Decimal,
) -> Result<Decimal, LedgerError> {
    let next = match kind {
        TransactionType::Deposit => balance
            .checked_add(amount)
            .filter(|next| *next <= MAX_MONEY)
            .ok_or(LedgerError::BalanceOverflow)?,
        TransactionType::Withdraw => {
            if balance < amount {
                return Err(LedgerError::InsufficientFunds {
                    balance,
                    requested: amount,
                });
            }
            balance - amount
        }
    };

    Ok(to_money(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deposit_adds_amount() {
        let next = apply(dec!(10.25), TransactionType::Deposit, dec!(100)).unwrap();
        assert_eq!(next, dec!(110.25));
    }

    #[test]
    fn zero_deposit_keeps_balance() {
        let next = apply(dec!(42), TransactionType::Deposit, Decimal::ZERO).unwrap();
        assert_eq!(next, dec!(42));
    }

    #[test]
    fn withdraw_subtracts_amount() {
        let next = apply(dec!(100), TransactionType::Withdraw, dec!(50)).unwrap();
        assert_eq!(next, dec!(50));
    }

    #[test]
    fn withdraw_of_whole_balance_leaves_zero() {
        let next = apply(dec!(75.40), TransactionType::Withdraw, dec!(75.40)).unwrap();
        assert_eq!(next, Decimal::ZERO);
    }

    #[test]
    fn withdraw_more_than_balance_is_rejected() {
        let err = apply(dec!(100), TransactionType::Withdraw, dec!(150)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                balance: dec!(100),
                requested: dec!(150),
            }
        );
        assert_eq!(err.to_string(), "Insufficient funds");
    }

    #[test]
    fn deposit_past_column_range_is_rejected() {
        let err = apply(MAX_MONEY, TransactionType::Deposit, dec!(0.01)).unwrap_err();
        assert_eq!(err, LedgerError::BalanceOverflow);
    }

    #[test]
    fn deposit_up_to_column_range_is_accepted() {
        let next = apply(MAX_MONEY - dec!(1), TransactionType::Deposit, dec!(1)).unwrap();
        assert_eq!(next, MAX_MONEY);
    }

    #[test]
    fn max_money_matches_numeric_18_2() {
        assert_eq!(MAX_MONEY.to_string(), "9999999999999999.99");
    }

    #[test]
    fn result_is_rescaled_to_two_places() {
        let next = apply(Decimal::ZERO, TransactionType::Deposit, dec!(5)).unwrap();
        assert_eq!(next.to_string(), "5.00");
        assert_eq!(to_money(dec!(1.5)).to_string(), "1.50");
    }
}
