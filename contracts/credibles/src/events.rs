use soroban_sdk::{contractevent, Address, String};

use crate::skills::Category;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mint {
    #[topic]
    pub to: Address,
    pub token_id: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XpAdded {
    #[topic]
    pub token_id: u64,
    pub category: Category,
    pub amount: u64,
    pub total: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LevelUp {
    #[topic]
    pub token_id: u64,
    pub category: Category,
    pub new_level: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GateUpdated {
    pub gate: Option<Address>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuerRequested {
    #[topic]
    pub issuer: Address,
    pub domain: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssuerVerified {
    #[topic]
    pub issuer: Address,
    pub approver: Address,
    pub domain: String,
}
