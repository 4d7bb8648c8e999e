#![no_std]

use soroban_sdk::{contract, contractmeta, Address, Env};

contractmeta!(key = "Description", val = "Credibles talent payment gateway");

mod contract;
mod errors;
mod events;


pub use errors::GatewayError;

/// 100% in basis points.
pub const MAX_BPS: u32 = 10_000;

#[contract]
pub struct TalentPaymentGateway;

pub trait PaymentGatewayContract {

    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `admin` - Account allowed to change the price.
    /// * `token` - Token contract payments are made in.
    /// * `treasury` - Receives the part of each payment not owed to the talent.
    /// * `price` - Price of one unlock, in the token's smallest unit.
    /// * `talent_share_bps` - Share of the price paid to the talent, in basis points.
    fn __constructor(e: &Env, admin: Address, token: Address, treasury: Address, price: i128, talent_share_bps: u32);

    /// Pay the fixed price to unlock `beneficiary`'s contact details.
    ///
    /// # Arguments
    ///
    /// * `e` - Access to the Soroban environment.
    /// * `payer` - Account paying; must authorize the token transfers.
    /// * `beneficiary` - The talent whose details are unlocked.
    ///
    /// # Events
    ///
    /// * topics - `["payment_accepted", payer: Address, beneficiary: Address]`
    /// * data - `[amount: i128]`
    fn pay_for_access(e: &Env, payer: Address, beneficiary: Address);

    fn has_access(e: &Env, payer: Address, beneficiary: Address) -> bool;

    /// Change the price of future unlocks. Admin only.
    fn set_price(e: &Env, price: i128);

    fn price(e: &Env) -> i128;

    fn token(e: &Env) -> Address;

    fn treasury(e: &Env) -> Address;

    fn talent_share_bps(e: &Env) -> u32;
}
