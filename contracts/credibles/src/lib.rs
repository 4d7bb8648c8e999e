#![no_std]

use soroban_sdk::{contract, contractmeta, Address, Env, String, Vec};

contractmeta!(key = "Description", val = "Credibles soulbound skill registry");

mod contract;
mod errors;
mod events;
mod skills;


pub use errors::CrediblesError;
pub use skills::{Category, SkillStats, XP_PER_LEVEL};

#[contract]
pub struct Credibles;

pub trait SkillRegistryContract {

    fn __constructor(e: &Env, owner: Address, name: String, symbol: String, uri: String);

    /// Mint a soulbound skill token for `to`.
    ///
    /// The token starts with zeroed XP in every category.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `to` - Account that will hold the token for good.
    /// * `token_id` - Token id as a number. Ids are never reused.
    ///
    /// # Events
    ///
    /// * topics - `["mint", to: Address]`
    /// * data - `[token_id: u64]`
    fn mint(e: &Env, to: Address, token_id: u64);

    /// Replace the single address allowed to call `add_xp`.
    ///
    /// Passing `None` disables XP writes entirely.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `gate` - The attestation gate contract, or `None`.
    fn set_attestation_gate(e: &Env, gate: Option<Address>);

    /// Returns the address currently allowed to write XP, if any.
    fn attestation_gate(e: &Env) -> Option<Address>;

    /// Add `amount` XP to `category` of `token_id`.
    ///
    /// `caller` must authorize the call and be the configured attestation
    /// gate. The category must be exactly one of `dev`, `defi`, `gov` or
    /// `social`.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `caller` - The invoking gate.
    /// * `token_id` - Token id as a number.
    /// * `category` - Category name, matched case-sensitively.
    /// * `amount` - XP to add. Zero is accepted.
    ///
    /// # Returns
    ///
    /// The new level if this call crossed at least one level threshold.
    ///
    /// # Events
    ///
    /// * topics - `["xp_added", token_id: u64]`
    /// * data - `[category: Category, amount: u64, total: u64]`
    /// * topics - `["level_up", token_id: u64]`, at most once per call
    /// * data - `[category: Category, new_level: u64]`
    fn add_xp(e: &Env, caller: Address, token_id: u64, category: String, amount: u64) -> Option<u64>;

    /// Always fails: skill tokens are soulbound.
    fn transfer(e: &Env, from: Address, to: Address, token_id: u64);

    /// Always fails: skill tokens are soulbound.
    fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, token_id: u64);

    /// Returns the skill record of `token_id`.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn skills(e: &Env, token_id: u64) -> SkillStats;

    /// Returns the skill records for many tokens at once.
    ///
    /// Entries line up with `token_ids`; unknown ids yield `None`.
    fn skills_batch(e: &Env, token_ids: Vec<u64>) -> Vec<Option<SkillStats>>;

    /// Returns `floor(xp / 100)` for `category` of `token_id`.
    fn level(e: &Env, token_id: u64, category: String) -> u64;

    /// Returns the number of tokens in `owner`'s account.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `owner` - Account of the token's owner.
    fn balance(e: &Env, owner: Address) -> u32;

    /// Returns the address of the owner of the given `token_id`.
    ///
    /// # Notes
    ///
    /// If the token does not exist, this function is expected to panic.
    fn owner_of(e: &Env, token_id: u64) -> Address;

    /// Returns the contract owner.
    fn owner(e: &Env) -> Address;

    /// Returns the token collection name.
    fn name(e: &Env) -> String;

    /// Returns the token collection symbol.
    fn symbol(e: &Env) -> String;

    /// Returns the Uniform Resource Identifier (URI) for `token_id` token.
    ///
    /// The URI is the collection base URI followed by the decimal token id.
    fn token_uri(e: &Env, token_id: u64) -> String;

    /// Grant the admin role, which may approve issuers.
    fn add_admin(e: &Env, admin: Address);

    fn is_admin(e: &Env, account: Address) -> bool;

    /// Ask to become a verified issuer for an email `domain`.
    ///
    /// # Events
    ///
    /// * topics - `["issuer_requested", issuer: Address]`
    /// * data - `[domain: String]`
    fn request_issuer_verification(e: &Env, issuer: Address, domain: String);

    /// Approve a pending issuer request. `approver` must be the owner or an admin.
    ///
    /// # Events
    ///
    /// * topics - `["issuer_verified", issuer: Address]`
    /// * data - `[approver: Address, domain: String]`
    fn approve_issuer(e: &Env, approver: Address, issuer: Address);

    fn is_verified_issuer(e: &Env, issuer: Address) -> bool;

    fn pending_issuer_domain(e: &Env, issuer: Address) -> Option<String>;
}
