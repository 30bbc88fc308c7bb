//! 十六进制工具模块
//! 提供 0x 前缀十六进制字符串的判定与格式化

use ethers::types::U256;

/// 是否为 `0x` 开头且至少一位的十六进制串（大小写不敏感）
pub fn is_valid_hex(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(body) => !body.is_empty() && body.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// 是否为 32 字节十六进制串（含前缀共 66 个字符）
pub fn is_valid_bytes32(s: &str) -> bool {
    s.len() == 66 && is_valid_hex(s)
}

/// 去掉可选的 `0x` 前缀
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// 最小宽度十六进制（零为 `0x0`）
pub fn to_minimal_hex(value: U256) -> String {
    format!("{:#x}", value)
}

/// 32 字节定宽十六进制
pub fn to_bytes32_hex(value: U256) -> String {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    format!("0x{}", hex::encode(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_hex() {
        assert!(is_valid_hex("0x0"));
        assert!(is_valid_hex("0xDeadBeef"));
        assert!(!is_valid_hex("0x"));
        assert!(!is_valid_hex("1234"));
        assert!(!is_valid_hex("0xzz"));
    }

    #[test]
    fn test_is_valid_bytes32() {
        let r = format!("0x{}", "ab".repeat(32));
        assert!(is_valid_bytes32(&r));
        assert!(is_valid_bytes32(&r.to_uppercase().replacen("0X", "0x", 1)));
        assert!(!is_valid_bytes32(&format!("0x{}", "ab".repeat(31))));
        assert!(!is_valid_bytes32(&"ab".repeat(33)));
    }

    #[test]
    fn test_minimal_hex() {
        assert_eq!(to_minimal_hex(U256::zero()), "0x0");
        assert_eq!(to_minimal_hex(U256::from(100u64)), "0x64");
        assert_eq!(to_minimal_hex(U256::from(100_000u64)), "0x186a0");
    }

    #[test]
    fn test_bytes32_hex() {
        let padded = to_bytes32_hex(U256::from(0x1bu64));
        assert_eq!(padded.len(), 66);
        assert!(padded.ends_with("1b"));
    }
}
