extern crate std;

use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{contract, contractimpl, symbol_short, testutils::Address as _, Address, Bytes, BytesN, Env, String};
use credibles::{Credibles, CrediblesClient, SkillStats};
use crate::{encode_payload, decode_payload, Attestation, AttestationResolver, AttestationResolverClient, XP_SCHEMA};

/// Stand-in for the external schema registry: the id is the hash of the schema.
#[contract]
pub struct MockSchemaRegistry;

#[contractimpl]
impl MockSchemaRegistry {
    pub fn register(e: Env, schema: String, resolver: Address, revocable: bool) -> BytesN<32> {
        e.storage().instance().set(&symbol_short!("schema"), &schema);
        e.storage().instance().set(&symbol_short!("resolver"), &resolver);
        e.storage().instance().set(&symbol_short!("revocable"), &revocable);
        e.crypto().sha256(&schema.to_xdr(&e)).into()
    }

    pub fn registered(e: Env) -> (String, Address, bool) {
        (
            e.storage().instance().get(&symbol_short!("schema")).unwrap(),
            e.storage().instance().get(&symbol_short!("resolver")).unwrap(),
            e.storage().instance().get(&symbol_short!("revocable")).unwrap(),
        )
    }
}

struct Setup<'a> {
    registry: CrediblesClient<'a>,
    resolver: AttestationResolverClient<'a>,
    schemas: MockSchemaRegistryClient<'a>,
    holder: Address,
}

/// Registry with token 1 minted and the resolver installed as its gate.
fn setup<'a>(e: &Env) -> Setup<'a> {
    e.mock_all_auths();

    let owner = Address::generate(e);
    let holder = Address::generate(e);
    let service = Address::generate(e);

    let registry_id = e.register(
        Credibles,
        (
            &owner,
            &String::from_str(e, "Credibles"),
            &String::from_str(e, "CRED"),
            &String::from_str(e, "https://credibles.example/token/"),
        ),
    );
    let registry = CrediblesClient::new(e, &registry_id);
    registry.mint(&holder, &1);

    let schemas_id = e.register(MockSchemaRegistry, ());
    let resolver_id = e.register(AttestationResolver, (&registry_id, &service, &schemas_id));
    registry.set_attestation_gate(&Some(resolver_id.clone()));

    Setup {
        registry,
        resolver: AttestationResolverClient::new(e, &resolver_id),
        schemas: MockSchemaRegistryClient::new(e, &schemas_id),
        holder,
    }
}

fn attestation(e: &Env, setup: &Setup, uid: u8, data: Bytes) -> Attestation {
    Attestation {
        uid: BytesN::from_array(e, &[uid; 32]),
        schema: setup.resolver.schema_id(),
        recipient: setup.holder.clone(),
        attester: Address::generate(e),
        data,
    }
}

#[test]
fn test_schema_registered_on_construction() {
    let e = Env::default();
    let setup = setup(&e);

    let (schema, resolver, revocable) = setup.schemas.registered();
    assert_eq!(schema, String::from_str(&e, XP_SCHEMA));
    assert_eq!(resolver, setup.resolver.address);
    assert!(revocable);

    let expected: BytesN<32> = e.crypto().sha256(&schema.clone().to_xdr(&e)).into();
    assert_eq!(setup.resolver.schema_id(), expected);
    assert_eq!(setup.resolver.schema(), schema);
}

#[test]
fn test_payload_round_trip() {
    let e = Env::default();

    let data = encode_payload(&e, 42, "gov", 75);
    assert_eq!(decode_payload(&e, &data), Some((42, String::from_str(&e, "gov"), 75)));
}

#[test]
fn test_attest_credits_xp() {
    let e = Env::default();
    let setup = setup(&e);

    let a = attestation(&e, &setup, 1, encode_payload(&e, 1, "dev", 60));
    assert!(setup.resolver.attest(&a));
    let b = attestation(&e, &setup, 2, encode_payload(&e, 1, "dev", 70));
    assert!(setup.resolver.attest(&b));

    let stats = setup.registry.skills(&1);
    assert_eq!(stats.dev, 130);
    assert_eq!(setup.registry.level(&1, &String::from_str(&e, "dev")), 1);
}

#[test]
#[should_panic(expected = "Error(Contract, #300)")]
fn test_attest_wrong_payload_shape() {
    let e = Env::default();
    let setup = setup(&e);

    let a = attestation(&e, &setup, 1, (1u64, 60u64).to_xdr(&e));
    setup.resolver.attest(&a);
}

#[test]
#[should_panic(expected = "Error(Contract, #300)")]
fn test_attest_wrong_field_types() {
    let e = Env::default();
    let setup = setup(&e);

    let a = attestation(&e, &setup, 1, (1u64, 7u32, 60u64).to_xdr(&e));
    setup.resolver.attest(&a);
}

#[test]
#[should_panic(expected = "Error(Contract, #301)")]
fn test_attest_other_schema() {
    let e = Env::default();
    let setup = setup(&e);

    let mut a = attestation(&e, &setup, 1, encode_payload(&e, 1, "dev", 60));
    a.schema = BytesN::from_array(&e, &[9; 32]);
    setup.resolver.attest(&a);
}

#[test]
fn test_registry_errors_propagate() {
    let e = Env::default();
    let setup = setup(&e);

    let bad_category = attestation(&e, &setup, 1, encode_payload(&e, 1, "Dev", 60));
    assert!(setup.resolver.try_attest(&bad_category).is_err());

    let unknown_token = attestation(&e, &setup, 2, encode_payload(&e, 99, "dev", 60));
    assert!(setup.resolver.try_attest(&unknown_token).is_err());

    assert_eq!(setup.registry.skills(&1), SkillStats::default());
}

#[test]
fn test_attest_fails_once_gate_moves() {
    let e = Env::default();
    let setup = setup(&e);

    setup.registry.set_attestation_gate(&Some(Address::generate(&e)));

    let a = attestation(&e, &setup, 1, encode_payload(&e, 1, "social", 10));
    assert!(setup.resolver.try_attest(&a).is_err());
    assert_eq!(setup.registry.skills(&1).social, 0);
}

#[test]
fn test_revoke_keeps_xp() {
    let e = Env::default();
    let setup = setup(&e);

    let a = attestation(&e, &setup, 1, encode_payload(&e, 1, "defi", 120));
    assert!(setup.resolver.attest(&a));
    let before = setup.registry.skills(&1);

    assert!(setup.resolver.revoke(&a));
    assert_eq!(setup.registry.skills(&1), before);
    assert_eq!(before.defi, 120);
}

#[test]
#[should_panic]
fn test_attest_requires_service_auth() {
    let e = Env::default();
    let setup = setup(&e);
    let a = attestation(&e, &setup, 1, encode_payload(&e, 1, "dev", 60));

    e.set_auths(&[]);
    setup.resolver.attest(&a);
}

#[test]
#[should_panic(expected = "Error(Contract, #302)")]
fn test_unset_registry() {
    let e = Env::default();
    let setup = setup(&e);

    e.as_contract(&setup.resolver.address, || {
        e.storage().instance().remove(&crate::contract::DataKey::Registry);
    });
    setup.resolver.registry();
}
