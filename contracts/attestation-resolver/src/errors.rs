use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ResolverError {
    /// Indicates an attestation payload that is not `(u64, String, u64)`.
    DecodeError = 300,
    /// Indicates an attestation made against another schema.
    SchemaMismatch = 301,
    /// Indicates an access to unset configuration.
    UnsetConfig = 302,
}
