/*!
 * Vigia Utils
 *
 * Utilitários de endereços, números e hashing usados pelos bots
 */

use crate::error::{Error, Result};
use ethers::types::{Address, I256, U256};
use ethers::utils::to_checksum;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

/// Converte uma string hexadecimal para Address
pub fn hex_to_address(hex: &str) -> Option<Address> {
    let hex_str = hex.strip_prefix("0x").unwrap_or(hex);
    Address::from_str(hex_str).ok()
}

/// Como [`hex_to_address`], mas com erro descritivo
pub fn parse_address(hex: &str) -> Result<Address> {
    hex_to_address(hex).ok_or_else(|| Error::DecodeError(format!("endereço inválido: {hex}")))
}

/// Formata um Address em hexadecimal minúsculo
pub fn format_address(address: &Address) -> String {
    format!("0x{:x}", address)
}

/// Formata um Address no formato checksum (EIP-55)
pub fn format_checksum_address(address: &Address) -> String {
    to_checksum(address, None)
}

/// Formata um U256 em decimal
pub fn format_u256(value: &U256) -> String {
    value.to_string()
}

/// Formata um I256 em decimal preservando o sinal
pub fn format_i256(value: &I256) -> String {
    value.to_string()
}

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = "0x1F98431c8aD98523631AE4a59f267346ea31F984";

    #[test]
    fn parses_with_and_without_prefix() {
        let a = hex_to_address(MIXED).unwrap();
        let b = hex_to_address(&MIXED[2..]).unwrap();
        assert_eq!(a, b);
        assert!(hex_to_address("0x1234").is_none());
        assert!(matches!(parse_address("xyz"), Err(Error::DecodeError(_))));
    }

    #[test]
    fn formats_lowercase_and_checksum() {
        let a = parse_address(MIXED).unwrap();
        assert_eq!(format_address(&a), MIXED.to_lowercase());
        assert_eq!(format_checksum_address(&a), MIXED);
    }

    #[test]
    fn formats_signed_amounts() {
        assert_eq!(format_i256(&I256::from(-1234i64)), "-1234");
        assert_eq!(format_i256(&I256::from(20i64)), "20");
        assert_eq!(format_u256(&U256::from(12345u64)), "12345");
    }

    #[test]
    fn keccak_of_empty_input() {
        let hash = keccak256(&[]);
        assert_eq!(
            format!("0x{}", hash.iter().map(|b| format!("{:02x}", b)).collect::<String>()),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}
