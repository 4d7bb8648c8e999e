//! Attestation service callbacks

use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, Address, BytesN, Env, String};
use crate::errors::ResolverError;
use crate::interfaces::{SchemaRegistryClient, SkillRegistryClient};
use crate::payload::{decode_payload, XP_SCHEMA};
use crate::{events, Attestation, AttestationGateContract, AttestationResolver, AttestationResolverArgs, AttestationResolverClient};

#[contracttype]
pub enum DataKey {
    Registry,
    AttestationService,
    SchemaRegistry,
    SchemaId,
}

fn read_address(e: &Env, key: &DataKey) -> Address {
    e.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(e, ResolverError::UnsetConfig))
}

fn read_schema_id(e: &Env) -> BytesN<32> {
    e.storage()
        .instance()
        .get(&DataKey::SchemaId)
        .unwrap_or_else(|| panic_with_error!(e, ResolverError::UnsetConfig))
}

#[contractimpl]
impl AttestationGateContract for AttestationResolver {

    fn __constructor(e: &Env, registry: Address, attestation_service: Address, schema_registry: Address) {
        e.storage().instance().set(&DataKey::Registry, &registry);
        e.storage().instance().set(&DataKey::AttestationService, &attestation_service);
        e.storage().instance().set(&DataKey::SchemaRegistry, &schema_registry);

        let schema_id = SchemaRegistryClient::new(e, &schema_registry).register(
            &String::from_str(e, XP_SCHEMA),
            &e.current_contract_address(),
            &true,
        );
        e.storage().instance().set(&DataKey::SchemaId, &schema_id);
    }

    fn attest(e: &Env, attestation: Attestation) -> bool {
        read_address(e, &DataKey::AttestationService).require_auth();

        if attestation.schema != read_schema_id(e) {
            panic_with_error!(e, ResolverError::SchemaMismatch);
        }

        let (subject_id, category, xp_value) = decode_payload(e, &attestation.data)
            .unwrap_or_else(|| panic_with_error!(e, ResolverError::DecodeError));

        let registry = SkillRegistryClient::new(e, &read_address(e, &DataKey::Registry));
        let level = registry.add_xp(&e.current_contract_address(), &subject_id, &category, &xp_value);
        if let Some(level) = level {
            log!(e, "attestation raised level", subject_id, level);
        }

        events::AttestationApplied {
            uid: attestation.uid,
            subject_id,
            category,
            xp_value,
        }
        .publish(e);

        true
    }

    fn revoke(e: &Env, attestation: Attestation) -> bool {
        read_address(e, &DataKey::AttestationService).require_auth();

        log!(e, "attestation revoked, xp kept", attestation.uid);
        events::AttestationRevoked { uid: attestation.uid }.publish(e);

        true
    }

    fn registry(e: &Env) -> Address {
        read_address(e, &DataKey::Registry)
    }

    fn attestation_service(e: &Env) -> Address {
        read_address(e, &DataKey::AttestationService)
    }

    fn schema(e: &Env) -> String {
        String::from_str(e, XP_SCHEMA)
    }

    fn schema_id(e: &Env) -> BytesN<32> {
        read_schema_id(e)
    }
}
