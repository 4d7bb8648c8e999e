use soroban_sdk::xdr::{FromXdr, ToXdr};
use soroban_sdk::{Bytes, Env, String};

/// Schema registered for skill attestations.
pub const XP_SCHEMA: &str = "uint256 subjectId, string category, uint256 xpValue";

/// `(subject_id, category, xp_value)`
pub type XpPayload = (u64, String, u64);

/// Decodes an attestation payload, or `None` if it is not an XP tuple.
///
/// The bytes must be valid XDR; the host aborts the call on bytes that are not.
pub fn decode_payload(e: &Env, data: &Bytes) -> Option<XpPayload> {
    <XpPayload as FromXdr>::from_xdr(e, data).ok()
}

pub fn encode_payload(e: &Env, subject_id: u64, category: &str, xp_value: u64) -> Bytes {
    (subject_id, String::from_str(e, category), xp_value).to_xdr(e)
}
