use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrediblesError {
    /// Indicates a non-existent `token_id`.
    NonExistentToken = 200,
    /// Indicates overflow when adding two values
    MathOverflow = 205,
    /// Indicates the token was already minted.
    TokenAlreadyMinted = 210,
    /// Indicates the length of the base URI exceeds the maximum allowed.
    BaseUriMaxLenExceeded = 211,
    /// Indicates an access to unset metadata.
    UnsetMetadata = 213,
    /// Indicates a category outside `dev`, `defi`, `gov`, `social`.
    InvalidCategory = 220,
    /// Indicates the caller does not hold the role the operation needs.
    Unauthorized = 221,
    /// Indicates a transfer of a soulbound token.
    SoulboundViolation = 222,
    /// Indicates an issuer approval without a pending request.
    NoPendingVerification = 223,
}
