use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GatewayError {
    /// Indicates a price that is zero or negative.
    InvalidPrice = 400,
    /// Indicates a talent share above 10_000 basis points.
    InvalidShare = 401,
    /// Indicates the payer already unlocked this beneficiary.
    AlreadyPaid = 402,
    /// Indicates a payer trying to unlock their own details.
    SelfPayment = 403,
    /// Indicates overflow when splitting the price
    MathOverflow = 405,
    /// Indicates an access to unset configuration.
    UnsetConfig = 406,
}
