#![no_std]

use soroban_sdk::{contract, contractmeta, contracttype, Address, Bytes, BytesN, Env, String};

contractmeta!(key = "Description", val = "Credibles attestation resolver");

mod contract;
mod errors;
mod events;
mod interfaces;
mod payload;

#[cfg(test)]
mod test;

pub use errors::ResolverError;
pub use interfaces::{SchemaRegistryClient, SkillRegistryClient};
pub use payload::{decode_payload, encode_payload, XpPayload, XP_SCHEMA};

/// An attestation as handed over by the attestation service.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attestation {
    pub uid: BytesN<32>,
    pub schema: BytesN<32>,
    pub recipient: Address,
    pub attester: Address,
    /// XDR of `(subject_id: u64, category: String, xp_value: u64)`.
    pub data: Bytes,
}

#[contract]
pub struct AttestationResolver;

pub trait AttestationGateContract {

    /// Registers [`XP_SCHEMA`] with `schema_registry`, naming this contract
    /// as its resolver, and keeps the returned schema id.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `registry` - The Credibles skill registry to credit.
    /// * `attestation_service` - The only account allowed to deliver attestations.
    /// * `schema_registry` - External schema registry contract.
    fn __constructor(e: &Env, registry: Address, attestation_service: Address, schema_registry: Address);

    /// Apply an attestation: decode its payload and credit the XP.
    ///
    /// Failures from the skill registry (unknown token, invalid category,
    /// this contract not being the registry's gate) abort the call.
    ///
    /// # Returns
    ///
    /// `true` once the XP was credited.
    ///
    /// # Events
    ///
    /// * topics - `["attestation_applied", uid: BytesN<32>]`
    /// * data - `[subject_id: u64, category: String, xp_value: u64]`
    fn attest(e: &Env, attestation: Attestation) -> bool;

    /// Acknowledge a revocation.
    ///
    /// XP granted by the original attestation is kept.
    fn revoke(e: &Env, attestation: Attestation) -> bool;

    fn registry(e: &Env) -> Address;

    fn attestation_service(e: &Env) -> Address;

    /// Returns the schema string registered on construction.
    fn schema(e: &Env) -> String;

    /// Returns the schema id assigned by the schema registry.
    fn schema_id(e: &Env) -> BytesN<32>;
}
