//! Derive the first receive address of each supported type
//! Run with: cargo run --example derive_addresses -- [testnet|bitcoin|regtest]

use addrkit_codec::{
    bip32_key_to_addr_segwit, bip32_key_to_address, wif, wif_to_address, AddressType,
    KeyCompression, NetworkParams,
};
use bip39::{Language, Mnemonic};
use bitcoin::bip32::{DerivationPath, Xpriv, Xpub};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::Network;

fn main() {
    let network = match std::env::args().nth(1).as_deref() {
        Some("bitcoin") => Network::Bitcoin,
        Some("regtest") => Network::Regtest,
        _ => Network::Testnet,
    };
    let params = NetworkParams::from(network);

    let mnemonic = Mnemonic::generate_in(Language::English, 12).unwrap();
    println!("=== {} WALLET ===\n", params.name.to_uppercase());
    println!("Mnemonic (throwaway, do not fund on mainnet):\n");
    println!("{}\n", mnemonic);

    let seed = mnemonic.to_seed("");
    let secp = Secp256k1::new();
    let master = Xpriv::new_master(network, &seed).unwrap();
    let coin = if network == Network::Bitcoin { 0 } else { 1 };

    for (purpose, addr_type) in [
        (44, AddressType::P2pkh),
        (49, AddressType::P2shP2wpkh),
        (84, AddressType::P2wpkh),
    ] {
        let path: DerivationPath = format!("m/{}'/{}'/0'/0/0", purpose, coin).parse().unwrap();
        let child = master.derive_priv(&secp, &path).unwrap();
        let xpub = Xpub::from_priv(&secp, &child);

        let address = match addr_type {
            AddressType::P2pkh => {
                bip32_key_to_address(&xpub, addr_type, params.p2pkh_version).unwrap()
            }
            AddressType::P2shP2wpkh => {
                bip32_key_to_address(&xpub, addr_type, params.p2sh_version).unwrap()
            }
            AddressType::P2wpkh => bip32_key_to_addr_segwit(&xpub, &params.segwit_hrp).unwrap(),
        };
        println!("{:<12} {}  {}", format!("{:?}", addr_type), path, address);

        if addr_type == AddressType::P2pkh {
            // Same address again, this time through the WIF of the child key
            let key = child.private_key.secret_bytes();
            let encoded = wif::encode(&key, params.wif_prefix, KeyCompression::Compressed).unwrap();
            let via_wif = wif_to_address(&encoded, params.wif_prefix, params.p2pkh_version).unwrap();
            assert_eq!(via_wif, address);
        }
    }
    println!();
}
