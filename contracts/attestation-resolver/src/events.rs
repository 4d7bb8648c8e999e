use soroban_sdk::{contractevent, BytesN, String};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttestationApplied {
    #[topic]
    pub uid: BytesN<32>,
    pub subject_id: u64,
    pub category: String,
    pub xp_value: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttestationRevoked {
    #[topic]
    pub uid: BytesN<32>,
}
