use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller is not the configured administrator.
    Unauthorized = 3,
    /// The sale gate has already been closed.
    AlreadyClosed = 4,
    /// Non-privileged source while the sale is open.
    TransferRestricted = 5,
    InvalidRecipient = 6,
    InsufficientBalance = 7,
    InvalidBeneficiary = 8,
    IndexOutOfRange = 9,
    InvalidAmount = 10,
    InvalidRole = 11,
    SaleTokensAlreadyCreated = 12,
    InsufficientAllowance = 13,
    Overflow = 14,
}
