//! Network parameters
//!
//! Bundles of the prefix bytes and HRPs a network uses. The codecs never
//! consult these on their own; callers pick the values they need and pass
//! them explicitly. `NetworkParams` is serde-enabled so host applications can
//! keep custom networks in their own config files.

use bitcoin::Network;
use serde::{Deserialize, Serialize};

use crate::derive::{
    ADDRESS_VERSION_P2PKH_MAINNET, ADDRESS_VERSION_P2PKH_TESTNET, ADDRESS_VERSION_P2SH_MAINNET,
    ADDRESS_VERSION_P2SH_TESTNET,
};
use crate::wif::{WIF_PREFIX_MAINNET, WIF_PREFIX_TESTNET};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Human-readable network name
    pub name: String,
    /// Version byte of P2PKH addresses
    pub p2pkh_version: u8,
    /// Version byte of P2SH addresses
    pub p2sh_version: u8,
    /// WIF private key prefix
    pub wif_prefix: u8,
    /// Bech32 human-readable part for native segwit addresses
    pub segwit_hrp: String,
    /// Confidential address prefix (Elements chains only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidential_prefix: Option<u8>,
}

impl NetworkParams {
    /// Bitcoin mainnet
    pub fn bitcoin() -> Self {
        Self {
            name: "bitcoin".into(),
            p2pkh_version: ADDRESS_VERSION_P2PKH_MAINNET,
            p2sh_version: ADDRESS_VERSION_P2SH_MAINNET,
            wif_prefix: WIF_PREFIX_MAINNET,
            segwit_hrp: "bc".into(),
            confidential_prefix: None,
        }
    }

    /// Bitcoin testnet (also signet)
    pub fn testnet() -> Self {
        Self {
            name: "testnet".into(),
            p2pkh_version: ADDRESS_VERSION_P2PKH_TESTNET,
            p2sh_version: ADDRESS_VERSION_P2SH_TESTNET,
            wif_prefix: WIF_PREFIX_TESTNET,
            segwit_hrp: "tb".into(),
            confidential_prefix: None,
        }
    }

    /// Bitcoin regtest
    pub fn regtest() -> Self {
        Self {
            name: "regtest".into(),
            segwit_hrp: "bcrt".into(),
            ..Self::testnet()
        }
    }

    /// Liquid v1 mainnet
    pub fn liquid() -> Self {
        Self {
            name: "liquid".into(),
            p2pkh_version: 57,
            p2sh_version: 39,
            wif_prefix: WIF_PREFIX_MAINNET,
            segwit_hrp: "ex".into(),
            confidential_prefix: Some(0x0c),
        }
    }

    /// Elements regtest
    pub fn liquid_regtest() -> Self {
        Self {
            name: "liquid-regtest".into(),
            p2pkh_version: 235,
            p2sh_version: 75,
            wif_prefix: WIF_PREFIX_TESTNET,
            segwit_hrp: "ert".into(),
            confidential_prefix: Some(0x04),
        }
    }
}

impl From<Network> for NetworkParams {
    fn from(network: Network) -> Self {
        match network {
            Network::Bitcoin => Self::bitcoin(),
            Network::Regtest => Self::regtest(),
            Network::Signet => Self {
                name: "signet".into(),
                ..Self::testnet()
            },
            _ => Self::testnet(),
        }
    }
}
