//! Clients for the contracts the resolver talks to.

use soroban_sdk::{contractclient, Address, BytesN, Env, String};

/// The subset of the Credibles registry the resolver calls.
#[contractclient(name = "SkillRegistryClient")]
pub trait SkillRegistry {
    fn add_xp(e: Env, caller: Address, token_id: u64, category: String, amount: u64) -> Option<u64>;
}

/// External schema registry. Returns the id assigned to the schema.
#[contractclient(name = "SchemaRegistryClient")]
pub trait SchemaRegistry {
    fn register(e: Env, schema: String, resolver: Address, revocable: bool) -> BytesN<32>;
}
