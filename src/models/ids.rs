//! Type aliases for entity IDs. Both tables use `SERIAL` keys, so ids are `i32`
//! from the database row all the way out to the JSON body.

pub type WalletId = i32;
pub type TransactionId = i32;
