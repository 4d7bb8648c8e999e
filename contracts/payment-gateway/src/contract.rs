//! Pay-to-unlock contact details

use soroban_sdk::{contractimpl, contracttype, log, panic_with_error, token, Address, Env, TryFromVal, Val};
use crate::errors::GatewayError;
use crate::{events, PaymentGatewayContract, TalentPaymentGateway, TalentPaymentGatewayArgs, TalentPaymentGatewayClient, MAX_BPS};

const DAY_IN_LEDGERS: u32 = 17_280;
pub const ACCESS_TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
pub const ACCESS_TTL_EXTEND: u32 = 150 * DAY_IN_LEDGERS;

#[contracttype]
pub enum DataKey {
    Admin,
    Token,
    Treasury,
    Price,
    TalentShare,
}

#[contracttype]
pub enum AccessKey {
    Access(Address /* payer */, Address /* beneficiary */),
}

fn read<V: TryFromVal<Env, Val>>(e: &Env, key: &DataKey) -> V {
    e.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(e, GatewayError::UnsetConfig))
}

fn validate_price(e: &Env, price: i128) {
    if price <= 0 {
        panic_with_error!(e, GatewayError::InvalidPrice);
    }
}

/// Splits `price` into `(talent, treasury)` amounts.
pub fn split(price: i128, talent_share_bps: u32) -> Option<(i128, i128)> {
    let talent = price.checked_mul(talent_share_bps as i128)? / MAX_BPS as i128;
    Some((talent, price - talent))
}

#[contractimpl]
impl PaymentGatewayContract for TalentPaymentGateway {

    fn __constructor(e: &Env, admin: Address, token: Address, treasury: Address, price: i128, talent_share_bps: u32) {
        validate_price(e, price);
        if talent_share_bps > MAX_BPS {
            panic_with_error!(e, GatewayError::InvalidShare);
        }

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Token, &token);
        e.storage().instance().set(&DataKey::Treasury, &treasury);
        e.storage().instance().set(&DataKey::Price, &price);
        e.storage().instance().set(&DataKey::TalentShare, &talent_share_bps);
    }

    fn pay_for_access(e: &Env, payer: Address, beneficiary: Address) {
        payer.require_auth();

        if payer == beneficiary {
            panic_with_error!(e, GatewayError::SelfPayment);
        }

        let access_key = AccessKey::Access(payer.clone(), beneficiary.clone());
        if e.storage().persistent().has(&access_key) {
            panic_with_error!(e, GatewayError::AlreadyPaid);
        }

        let price: i128 = read(e, &DataKey::Price);
        let share: u32 = read(e, &DataKey::TalentShare);
        let (to_talent, to_treasury) = split(price, share)
            .unwrap_or_else(|| panic_with_error!(e, GatewayError::MathOverflow));

        let token = token::TokenClient::new(e, &read(e, &DataKey::Token));
        if to_talent > 0 {
            token.transfer(&payer, &beneficiary, &to_talent);
        }
        if to_treasury > 0 {
            let treasury: Address = read(e, &DataKey::Treasury);
            token.transfer(&payer, &treasury, &to_treasury);
        }

        e.storage().persistent().set(&access_key, &true);
        e.storage().persistent().extend_ttl(&access_key, ACCESS_TTL_THRESHOLD, ACCESS_TTL_EXTEND);

        log!(e, "contact unlocked", to_talent, to_treasury);
        events::PaymentAccepted { payer, beneficiary, amount: price }.publish(e);
    }

    fn has_access(e: &Env, payer: Address, beneficiary: Address) -> bool {
        e.storage()
            .persistent()
            .has(&AccessKey::Access(payer, beneficiary))
    }

    fn set_price(e: &Env, price: i128) {
        let admin: Address = read(e, &DataKey::Admin);
        admin.require_auth();
        validate_price(e, price);

        e.storage().instance().set(&DataKey::Price, &price);
        events::PriceUpdated { price }.publish(e);
    }

    fn price(e: &Env) -> i128 {
        read(e, &DataKey::Price)
    }

    fn token(e: &Env) -> Address {
        read(e, &DataKey::Token)
    }

    fn treasury(e: &Env) -> Address {
        read(e, &DataKey::Treasury)
    }

    fn talent_share_bps(e: &Env) -> u32 {
        read(e, &DataKey::TalentShare)
    }
}
