//! 交易参数校验与归一化
//!
//! 所有数值字段统一转换为最小宽度的 `0x` 十六进制串，
//! 并通过构造一次 legacy 交易确认剩余的结构约束

use ethers::types::{Signature, U256};

use crate::{
    domain::{
        legacy_transaction::{chain_id_from_v, LegacyTransaction},
        transaction_params::{
            NormalizedTransactionParams, Quantity, SignatureParts, TransactionParams,
        },
    },
    error::{NickMethodError, Result},
    utils::{address_validator::AddressValidator, hex_utils},
};

/// 参数校验器
pub struct ParamValidator;

impl ParamValidator {
    /// 校验并归一化完整参数集
    ///
    /// nonce、gasPrice、gasLimit、value、data 均为必填
    pub fn normalize(params: &TransactionParams) -> Result<NormalizedTransactionParams> {
        let nonce = Self::require(&params.nonce, "nonce")?;
        let gas_price = Self::require(&params.gas_price, "gasPrice")?;
        let gas_limit = Self::require(&params.gas_limit, "gasLimit")?;
        let value = Self::require(&params.value, "value")?;
        let data = Self::require(&params.data, "data")?;

        if !data.starts_with("0x") {
            return Err(NickMethodError::validation(
                "'data' should be a hex string starting with '0x'",
            ));
        }

        let nonce = Self::normalize_quantity(nonce, "nonce")?;
        let value = Self::normalize_quantity(value, "value")?;
        let gas_price = Self::normalize_quantity(gas_price, "gasPrice")?;
        let gas_limit = Self::normalize_quantity(gas_limit, "gasLimit")?;

        let signature = Self::normalize_signature(params)?;

        let to = match &params.to {
            Some(to) => {
                if !AddressValidator::is_valid_format(to) {
                    return Err(NickMethodError::validation(
                        "'to' should be a valid Ethereum address (hex string starting with '0x' and 42 characters long)",
                    ));
                }
                Some(to.clone())
            }
            None => None,
        };

        let normalized = NormalizedTransactionParams {
            nonce,
            gas_price,
            gas_limit,
            value,
            data: data.clone(),
            to,
            signature,
        };

        // 结构往返：必须能构造出合法交易
        Self::to_transaction(&normalized)?;

        Ok(normalized)
    }

    /// Nick's method 参数：gasPrice、gasLimit、data 必填，nonce 必须为零
    pub fn normalize_for_deployment(
        params: &TransactionParams,
    ) -> Result<NormalizedTransactionParams> {
        if params.gas_price.is_none() || params.gas_limit.is_none() || params.data.is_none() {
            return Err(NickMethodError::validation(
                "txParams must include gasLimit, gasPrice, and data properties",
            ));
        }

        let mut filled = params.clone();
        filled.nonce.get_or_insert(Quantity::Number(0));
        filled.value.get_or_insert(Quantity::Number(0));

        let normalized = Self::normalize(&filled)?;
        if normalized.nonce != "0x0" {
            return Err(NickMethodError::validation(
                "The nonce must be either 0 or 0x00 for contract deployment",
            ));
        }

        Ok(normalized)
    }

    /// 归一化参数的 JSON 形式（camelCase，缺省字段省略）
    pub fn type_zero_tx_json(params: &TransactionParams) -> Result<serde_json::Value> {
        let normalized = Self::normalize(params)?;
        serde_json::to_value(&normalized)
            .map_err(|e| NickMethodError::validation(format!("failed to serialize params: {}", e)))
    }

    /// 按交易构造语义从参数得到交易：缺失的数值字段视为零，缺失的 data 视为空
    pub fn transaction_from_params(params: &TransactionParams) -> Result<LegacyTransaction> {
        let mut filled = params.clone();
        filled.nonce.get_or_insert(Quantity::Number(0));
        filled.gas_price.get_or_insert(Quantity::Number(0));
        filled.gas_limit.get_or_insert(Quantity::Number(0));
        filled.value.get_or_insert(Quantity::Number(0));
        filled.data.get_or_insert_with(|| "0x".to_string());

        let normalized = Self::normalize(&filled)?;
        Self::to_transaction(&normalized)
    }

    /// 由归一化参数构造交易并检查结构约束
    pub fn to_transaction(normalized: &NormalizedTransactionParams) -> Result<LegacyTransaction> {
        let data = hex::decode(hex_utils::strip_0x(&normalized.data)).map_err(|e| {
            NickMethodError::validation(format!("'data' is not valid hex: {}", e))
        })?;

        let to = match &normalized.to {
            Some(to) => Some(AddressValidator::parse(to).ok_or_else(|| {
                NickMethodError::validation(format!("'to' is not a valid address: {}", to))
            })?),
            None => None,
        };

        let signature = match &normalized.signature {
            Some(parts) => {
                let v = Self::parse_hex(&parts.v, "v")?;
                if v > U256::from(u64::MAX) {
                    return Err(NickMethodError::validation("'v' is out of range"));
                }
                Some(Signature {
                    v: v.as_u64(),
                    r: Self::parse_hex(&parts.r, "r")?,
                    s: Self::parse_hex(&parts.s, "s")?,
                })
            }
            None => None,
        };

        let tx = LegacyTransaction {
            nonce: Self::parse_hex(&normalized.nonce, "nonce")?,
            gas_price: Self::parse_hex(&normalized.gas_price, "gasPrice")?,
            gas_limit: Self::parse_hex(&normalized.gas_limit, "gasLimit")?,
            to,
            value: Self::parse_hex(&normalized.value, "value")?,
            data,
            chain_id: signature.as_ref().and_then(|sig| chain_id_from_v(sig.v)),
            signature,
        };
        tx.validate_structure()?;

        Ok(tx)
    }

    /// 整数或 `0x` 十六进制串 → 最小宽度 `0x` 十六进制串
    pub fn normalize_quantity(quantity: &Quantity, field: &str) -> Result<String> {
        Self::parse_quantity(quantity, field).map(hex_utils::to_minimal_hex)
    }

    /// 整数或 `0x` 十六进制串 → U256
    pub fn parse_quantity(quantity: &Quantity, field: &str) -> Result<U256> {
        match quantity {
            Quantity::Number(n) => Ok(U256::from(*n)),
            Quantity::Hex(s) => Self::parse_hex(s, field),
        }
    }

    /// 校验 bytes32 覆盖值（r/s）
    pub fn validate_bytes32(value: &str, field: &str) -> Result<U256> {
        if !hex_utils::is_valid_bytes32(value) {
            return Err(NickMethodError::validation(format!(
                "The {} parameter must be a bytes32 hexadecimal string",
                field
            )));
        }
        Self::parse_hex(value, field)
    }

    fn parse_hex(s: &str, field: &str) -> Result<U256> {
        if !hex_utils::is_valid_hex(s) {
            return Err(NickMethodError::validation(format!(
                "'{}' should be a number or a hex string starting with '0x'",
                field
            )));
        }

        let digits = s[2..].trim_start_matches('0');
        if digits.is_empty() {
            return Ok(U256::zero());
        }
        if digits.len() > 64 {
            return Err(NickMethodError::validation(format!(
                "'{}' exceeds 256 bits",
                field
            )));
        }

        U256::from_str_radix(digits, 16).map_err(|_| {
            NickMethodError::validation(format!("'{}' is not a valid hex quantity", field))
        })
    }

    fn normalize_signature(params: &TransactionParams) -> Result<Option<SignatureParts>> {
        match (&params.v, &params.r, &params.s) {
            (None, None, None) => Ok(None),
            (Some(v), Some(r), Some(s)) => {
                let v = Self::normalize_quantity(v, "v")?;
                if !hex_utils::is_valid_bytes32(r) {
                    return Err(NickMethodError::validation(
                        "'r' should be a hex string with a length of 32 bytes (66 characters) starting with '0x'",
                    ));
                }
                if !hex_utils::is_valid_bytes32(s) {
                    return Err(NickMethodError::validation(
                        "'s' should be a hex string with a length of 32 bytes (66 characters) starting with '0x'",
                    ));
                }
                Ok(Some(SignatureParts {
                    v,
                    r: r.to_lowercase(),
                    s: s.to_lowercase(),
                }))
            }
            _ => Err(NickMethodError::validation(
                "'v', 'r', and 's' should all be provided together or none of them should be provided.",
            )),
        }
    }

    fn require<'a, T>(field: &'a Option<T>, name: &str) -> Result<&'a T> {
        field.as_ref().ok_or_else(|| {
            NickMethodError::validation(format!("missing required parameter '{}'", name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_params() -> TransactionParams {
        TransactionParams {
            nonce: Some(Quantity::Number(0)),
            gas_price: Some(Quantity::Number(100)),
            gas_limit: Some(Quantity::Hex("0x186a0".into())),
            value: Some(Quantity::Number(0)),
            data: Some("0x00".into()),
            ..Default::default()
        }
    }

    fn bytes32(byte: &str) -> String {
        format!("0x{}", byte.repeat(32))
    }

    #[test]
    fn test_normalize_converts_numbers() {
        let normalized = ParamValidator::normalize(&full_params()).unwrap();
        assert_eq!(normalized.nonce, "0x0");
        assert_eq!(normalized.gas_price, "0x64");
        assert_eq!(normalized.gas_limit, "0x186a0");
        assert_eq!(normalized.value, "0x0");
        assert_eq!(normalized.data, "0x00");
        assert!(normalized.to.is_none());
        assert!(normalized.signature.is_none());
    }

    #[test]
    fn test_int_and_hex_encodings_agree() {
        for (int, hex) in [(0u64, "0x00"), (100, "0x064"), (100_000, "0x186A0"), (1, "0x1")] {
            let a = ParamValidator::normalize_quantity(&Quantity::from(int), "value").unwrap();
            let b = ParamValidator::normalize_quantity(&Quantity::from(hex), "value").unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_missing_required_field() {
        for field in ["nonce", "gasPrice", "gasLimit", "value", "data"] {
            let mut params = full_params();
            match field {
                "nonce" => params.nonce = None,
                "gasPrice" => params.gas_price = None,
                "gasLimit" => params.gas_limit = None,
                "value" => params.value = None,
                _ => params.data = None,
            }
            let err = ParamValidator::normalize(&params).unwrap_err();
            assert!(err.is_validation());
            assert!(err.to_string().contains(field), "{}", err);
        }
    }

    #[test]
    fn test_data_requires_prefix() {
        let mut params = full_params();
        params.data = Some("00".into());
        assert!(ParamValidator::normalize(&params).unwrap_err().is_validation());

        params.data = Some("0xabc".into());
        assert!(ParamValidator::normalize(&params).unwrap_err().is_validation());
    }

    #[test]
    fn test_numeric_field_rejects_plain_string() {
        let mut params = full_params();
        params.gas_price = Some(Quantity::Hex("100".into()));
        let err = ParamValidator::normalize(&params).unwrap_err();
        assert!(err.to_string().contains("gasPrice"));
    }

    #[test]
    fn test_to_must_be_20_bytes() {
        let mut params = full_params();
        params.to = Some("0x1234".into());
        assert!(ParamValidator::normalize(&params).is_err());

        params.to = Some("0x123456789012345678901234567890123456789012".into());
        assert!(ParamValidator::normalize(&params).is_err());

        params.to = Some("0x1234567890123456789012345678901234567890".into());
        let normalized = ParamValidator::normalize(&params).unwrap();
        assert_eq!(
            normalized.to.as_deref(),
            Some("0x1234567890123456789012345678901234567890")
        );
    }

    #[test]
    fn test_partial_signature_rejected() {
        let mut params = full_params();
        params.v = Some(Quantity::Number(27));
        assert!(ParamValidator::normalize(&params).is_err());

        params.r = Some(bytes32("12"));
        assert!(ParamValidator::normalize(&params).is_err());

        let mut params = full_params();
        params.r = Some(bytes32("12"));
        params.s = Some(bytes32("34"));
        assert!(ParamValidator::normalize(&params).is_err());
    }

    #[test]
    fn test_full_signature_accepted() {
        let mut params = full_params();
        params.v = Some(Quantity::Hex("0x1b".into()));
        params.r = Some(bytes32("AB"));
        params.s = Some(bytes32("34"));
        let normalized = ParamValidator::normalize(&params).unwrap();
        let sig = normalized.signature.unwrap();
        assert_eq!(sig.v, "0x1b");
        assert_eq!(sig.r, bytes32("ab"));
    }

    #[test]
    fn test_signature_components_must_be_bytes32() {
        let mut params = full_params();
        params.v = Some(Quantity::Number(27));
        params.r = Some("0x1212".into());
        params.s = Some(bytes32("34"));
        assert!(ParamValidator::normalize(&params).is_err());

        params.r = Some(bytes32("12"));
        params.s = Some(format!("0x{}", "zz".repeat(32)));
        assert!(ParamValidator::normalize(&params).is_err());
    }

    #[test]
    fn test_structural_roundtrip_rejects_high_s() {
        let mut params = full_params();
        params.v = Some(Quantity::Number(27));
        params.r = Some(bytes32("12"));
        params.s = Some(bytes32("ff"));
        assert!(ParamValidator::normalize(&params).unwrap_err().is_validation());
    }

    #[test]
    fn test_quantity_over_256_bits() {
        let mut params = full_params();
        params.value = Some(Quantity::Hex(format!("0x1{}", "0".repeat(64))));
        assert!(ParamValidator::normalize(&params).is_err());

        // 前导零不计入位宽
        params.value = Some(Quantity::Hex(format!("0x{}1", "0".repeat(70))));
        assert_eq!(ParamValidator::normalize(&params).unwrap().value, "0x1");
    }

    #[test]
    fn test_deployment_defaults_and_nonce() {
        let params = TransactionParams::deployment(100u64, 100_000u64, "0x00");
        let normalized = ParamValidator::normalize_for_deployment(&params).unwrap();
        assert_eq!(normalized.nonce, "0x0");
        assert_eq!(normalized.value, "0x0");

        for zero in ["0x0", "0x00", "0x000"] {
            let params = TransactionParams::deployment(100u64, 100_000u64, "0x00").with_nonce(zero);
            assert!(ParamValidator::normalize_for_deployment(&params).is_ok());
        }

        let params = TransactionParams::deployment(100u64, 100_000u64, "0x00").with_nonce(1u64);
        assert!(ParamValidator::normalize_for_deployment(&params)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_deployment_requires_gas_and_data() {
        let mut params = TransactionParams::deployment(100u64, 100_000u64, "0x00");
        params.gas_limit = None;
        assert!(ParamValidator::normalize_for_deployment(&params).is_err());
    }

    #[test]
    fn test_transaction_from_sparse_params() {
        let params = TransactionParams {
            gas_limit: Some(Quantity::Number(21_000)),
            gas_price: Some(Quantity::Number(1)),
            ..Default::default()
        };
        let tx = ParamValidator::transaction_from_params(&params).unwrap();
        assert_eq!(tx.gas_limit, U256::from(21_000u64));
        assert!(tx.data.is_empty());
        assert!(!tx.is_signed());
    }

    #[test]
    fn test_validate_bytes32_override() {
        assert!(ParamValidator::validate_bytes32(&bytes32("12"), "r").is_ok());
        assert!(ParamValidator::validate_bytes32("0x12", "r").is_err());
    }

    #[test]
    fn test_type_zero_tx_json() {
        let json = ParamValidator::type_zero_tx_json(&full_params()).unwrap();
        assert!(json.get("gasPrice").is_some());
        assert!(json.get("gas_price").is_none());

        let mut params = full_params();
        params.data = Some("00".into());
        assert!(ParamValidator::type_zero_tx_json(&params).is_err());
    }
}
