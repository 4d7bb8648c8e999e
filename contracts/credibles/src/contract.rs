//! Soulbound skill token with attestation-gated XP

use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, Address, Env, String, Vec};
use crate::errors::CrediblesError;
use crate::skills::{crossed_level, Category, SkillStats};
use crate::{events, Credibles, CrediblesArgs, CrediblesClient, SkillRegistryContract};

/// Longest accepted base URI, in bytes.
pub const MAX_BASE_URI_LEN: u32 = 200;
/// `u64::MAX` has 20 decimal digits.
const MAX_TOKEN_URI_LEN: usize = MAX_BASE_URI_LEN as usize + 20;

const DAY_IN_LEDGERS: u32 = 17_280;
pub const TOKEN_TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
pub const TOKEN_TTL_EXTEND: u32 = 150 * DAY_IN_LEDGERS;

#[contracttype]
pub enum DataKey {
    ContractOwner,
    AttestationGate,
}

#[contracttype]
pub enum NFTStorageKey {
    Owner(u64),
    Balance(Address),
    Skills(u64),
    Name,
    Symbol,
    URI,
}

#[contracttype]
pub enum IssuerStorageKey {
    Admin(Address),
    Pending(Address),
    Verified(Address),
}

fn read_owner(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::ContractOwner)
        .unwrap_or_else(|| panic_with_error!(e, CrediblesError::UnsetMetadata))
}

fn read_gate(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::AttestationGate)
}

fn read_skills(e: &Env, token_id: u64) -> Option<SkillStats> {
    e.storage().persistent().get(&NFTStorageKey::Skills(token_id))
}

fn write_skills(e: &Env, token_id: u64, stats: &SkillStats) {
    let key = NFTStorageKey::Skills(token_id);
    e.storage().persistent().set(&key, stats);
    e.storage().persistent().extend_ttl(&key, TOKEN_TTL_THRESHOLD, TOKEN_TTL_EXTEND);
}

fn is_admin(e: &Env, account: &Address) -> bool {
    e.storage()
        .persistent()
        .get(&IssuerStorageKey::Admin(account.clone()))
        .unwrap_or(false)
}

fn parse_category(e: &Env, category: &String) -> Category {
    Category::parse(e, category)
        .unwrap_or_else(|| panic_with_error!(e, CrediblesError::InvalidCategory))
}

/// Writes the decimal digits of `value` at the start of `buf` and returns how many were written.
fn write_decimal(buf: &mut [u8], mut value: u64) -> usize {
    let mut digits = [0u8; 20];
    let mut n = 0;
    loop {
        digits[n] = b'0' + (value % 10) as u8;
        n += 1;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    for i in 0..n {
        buf[i] = digits[n - 1 - i];
    }
    n
}

#[contractimpl]
impl SkillRegistryContract for Credibles {

    fn __constructor(e: &Env, owner: Address, name: String, symbol: String, uri: String) {
        if uri.len() > MAX_BASE_URI_LEN {
            panic_with_error!(e, CrediblesError::BaseUriMaxLenExceeded);
        }

        e.storage().instance().set(&DataKey::ContractOwner, &owner);

        e.storage().instance().set(&NFTStorageKey::Name, &name);
        e.storage().instance().set(&NFTStorageKey::Symbol, &symbol);
        e.storage().instance().set(&NFTStorageKey::URI, &uri);
    }

    fn mint(e: &Env, to: Address, token_id: u64) {
        read_owner(e).require_auth();

        let owner_key = NFTStorageKey::Owner(token_id);
        if e.storage().persistent().has(&owner_key) {
            panic_with_error!(e, CrediblesError::TokenAlreadyMinted);
        }

        e.storage().persistent().set(&owner_key, &to);
        e.storage().persistent().extend_ttl(&owner_key, TOKEN_TTL_THRESHOLD, TOKEN_TTL_EXTEND);
        write_skills(e, token_id, &SkillStats::default());

        let balance_key = NFTStorageKey::Balance(to.clone());
        let balance: u32 = e.storage().persistent().get(&balance_key).unwrap_or(0);
        let balance = balance
            .checked_add(1)
            .unwrap_or_else(|| panic_with_error!(e, CrediblesError::MathOverflow));
        e.storage().persistent().set(&balance_key, &balance);
        e.storage().persistent().extend_ttl(&balance_key, TOKEN_TTL_THRESHOLD, TOKEN_TTL_EXTEND);

        log!(e, "minted skill token", token_id);
        events::Mint { to, token_id }.publish(e);
    }

    fn set_attestation_gate(e: &Env, gate: Option<Address>) {
        read_owner(e).require_auth();

        match &gate {
            Some(address) => e.storage().instance().set(&DataKey::AttestationGate, address),
            None => e.storage().instance().remove(&DataKey::AttestationGate),
        }

        events::GateUpdated { gate }.publish(e);
    }

    fn attestation_gate(e: &Env) -> Option<Address> {
        read_gate(e)
    }

    fn add_xp(e: &Env, caller: Address, token_id: u64, category: String, amount: u64) -> Option<u64> {
        caller.require_auth();
        if read_gate(e).as_ref() != Some(&caller) {
            panic_with_error!(e, CrediblesError::Unauthorized);
        }

        let mut stats = read_skills(e, token_id)
            .unwrap_or_else(|| panic_with_error!(e, CrediblesError::NonExistentToken));
        let category = parse_category(e, &category);

        let (old_xp, new_xp) = stats
            .add(category, amount)
            .unwrap_or_else(|| panic_with_error!(e, CrediblesError::MathOverflow));
        write_skills(e, token_id, &stats);

        events::XpAdded { token_id, category, amount, total: new_xp }.publish(e);

        let new_level = crossed_level(old_xp, new_xp);
        if let Some(new_level) = new_level {
            log!(e, "level up", token_id, new_level);
            events::LevelUp { token_id, category, new_level }.publish(e);
        }
        new_level
    }

    fn transfer(e: &Env, _from: Address, _to: Address, token_id: u64) {
        log!(e, "rejected transfer of soulbound token", token_id);
        panic_with_error!(e, CrediblesError::SoulboundViolation);
    }

    fn transfer_from(e: &Env, _spender: Address, _from: Address, _to: Address, token_id: u64) {
        log!(e, "rejected transfer of soulbound token", token_id);
        panic_with_error!(e, CrediblesError::SoulboundViolation);
    }

    fn skills(e: &Env, token_id: u64) -> SkillStats {
        read_skills(e, token_id)
            .unwrap_or_else(|| panic_with_error!(e, CrediblesError::NonExistentToken))
    }

    fn skills_batch(e: &Env, token_ids: Vec<u64>) -> Vec<Option<SkillStats>> {
        let mut out = Vec::new(e);
        for token_id in token_ids.iter() {
            out.push_back(read_skills(e, token_id));
        }
        out
    }

    fn level(e: &Env, token_id: u64, category: String) -> u64 {
        let stats = Self::skills(e, token_id);
        stats.level(parse_category(e, &category))
    }

    fn balance(e: &Env, owner: Address) -> u32 {
        e.storage()
            .persistent()
            .get(&NFTStorageKey::Balance(owner))
            .unwrap_or(0)
    }

    fn owner_of(e: &Env, token_id: u64) -> Address {
        e.storage().persistent()
        .get(&NFTStorageKey::Owner(token_id))
        .unwrap_or_else(|| panic_with_error!(e, CrediblesError::NonExistentToken))
    }

    fn owner(e: &Env) -> Address {
        read_owner(e)
    }

    fn name(e: &Env) -> String {
        e.storage()
            .instance()
            .get(&NFTStorageKey::Name)
            .unwrap_or_else(|| panic_with_error!(e, CrediblesError::UnsetMetadata))
    }

    fn symbol(e: &Env) -> String {
        e.storage()
            .instance()
            .get(&NFTStorageKey::Symbol)
            .unwrap_or_else(|| panic_with_error!(e, CrediblesError::UnsetMetadata))
    }

    fn token_uri(e: &Env, token_id: u64) -> String {
        if !e.storage().persistent().has(&NFTStorageKey::Owner(token_id)) {
            panic_with_error!(e, CrediblesError::NonExistentToken);
        }

        let base: String = e
            .storage()
            .instance()
            .get(&NFTStorageKey::URI)
            .unwrap_or_else(|| panic_with_error!(e, CrediblesError::UnsetMetadata));
        let base_len = base.len() as usize;

        let mut buf = [0u8; MAX_TOKEN_URI_LEN];
        base.copy_into_slice(&mut buf[..base_len]);
        let digits = write_decimal(&mut buf[base_len..], token_id);

        String::from_bytes(e, &buf[..base_len + digits])
    }

    fn add_admin(e: &Env, admin: Address) {
        read_owner(e).require_auth();

        let key = IssuerStorageKey::Admin(admin);
        e.storage().persistent().set(&key, &true);
        e.storage().persistent().extend_ttl(&key, TOKEN_TTL_THRESHOLD, TOKEN_TTL_EXTEND);
    }

    fn is_admin(e: &Env, account: Address) -> bool {
        is_admin(e, &account)
    }

    fn request_issuer_verification(e: &Env, issuer: Address, domain: String) {
        issuer.require_auth();

        let key = IssuerStorageKey::Pending(issuer.clone());
        e.storage().persistent().set(&key, &domain);
        e.storage().persistent().extend_ttl(&key, TOKEN_TTL_THRESHOLD, TOKEN_TTL_EXTEND);

        events::IssuerRequested { issuer, domain }.publish(e);
    }

    fn approve_issuer(e: &Env, approver: Address, issuer: Address) {
        approver.require_auth();
        if approver != read_owner(e) && !is_admin(e, &approver) {
            panic_with_error!(e, CrediblesError::Unauthorized);
        }

        let pending_key = IssuerStorageKey::Pending(issuer.clone());
        let domain: String = e
            .storage()
            .persistent()
            .get(&pending_key)
            .unwrap_or_else(|| panic_with_error!(e, CrediblesError::NoPendingVerification));
        e.storage().persistent().remove(&pending_key);

        let verified_key = IssuerStorageKey::Verified(issuer.clone());
        e.storage().persistent().set(&verified_key, &true);
        e.storage().persistent().extend_ttl(&verified_key, TOKEN_TTL_THRESHOLD, TOKEN_TTL_EXTEND);

        events::IssuerVerified { issuer, approver, domain }.publish(e);
    }

    fn is_verified_issuer(e: &Env, issuer: Address) -> bool {
        e.storage()
            .persistent()
            .get(&IssuerStorageKey::Verified(issuer))
            .unwrap_or(false)
    }

    fn pending_issuer_domain(e: &Env, issuer: Address) -> Option<String> {
        e.storage().persistent().get(&IssuerStorageKey::Pending(issuer))
    }
}
