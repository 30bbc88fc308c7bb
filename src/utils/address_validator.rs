//! 地址验证模块
//!
//! EVM 20 字节地址的格式校验与 EIP-55 Checksum 校验

use ethers::types::Address;

/// 地址验证器
pub struct AddressValidator;

impl AddressValidator {
    /// 验证地址格式：`0x` 前缀 + 40 位十六进制（共 42 个字符）
    ///
    /// 不要求大小写满足 checksum，与交易编码层的行为保持一致
    pub fn is_valid_format(address: &str) -> bool {
        if !address.starts_with("0x") {
            return false;
        }

        if address.len() != 42 {
            return false;
        }

        address[2..].chars().all(|c| c.is_ascii_hexdigit())
    }

    /// 验证EIP-55 Checksum
    /// https://eips.ethereum.org/EIPS/eip-55
    pub fn is_valid_checksum(address: &str) -> bool {
        use sha3::{Digest, Keccak256};

        if !Self::is_valid_format(address) {
            return false;
        }

        let addr_lower = address[2..].to_lowercase();
        let mut hasher = Keccak256::new();
        hasher.update(addr_lower.as_bytes());
        let hash = hasher.finalize();

        let hex_chars = &address[2..];
        for (i, ch) in hex_chars.chars().enumerate() {
            if ch.is_alphabetic() {
                let hash_byte = hash[i / 2];
                let hash_nibble = if i % 2 == 0 {
                    hash_byte >> 4
                } else {
                    hash_byte & 0x0f
                };

                let should_be_uppercase = hash_nibble >= 8;
                if ch.is_uppercase() != should_be_uppercase {
                    return false;
                }
            }
        }

        true
    }

    /// 转换为 EIP-55 混合大小写形式
    pub fn to_checksum(address: &Address) -> String {
        ethers::utils::to_checksum(address, None)
    }

    /// 解析 42 字符地址
    pub fn parse(address: &str) -> Option<Address> {
        if !Self::is_valid_format(address) {
            return None;
        }
        hex::decode(&address[2..])
            .ok()
            .map(|bytes| Address::from_slice(&bytes))
    }
}
