//! 交易参数模型
//!
//! 调用方参数允许数值字段以整数或 `0x` 十六进制串两种形式出现，
//! 归一化之后统一为最小宽度的 `0x` 十六进制串

use serde::{Deserialize, Serialize};

/// 数值参数：整数或 `0x` 十六进制串
///
/// JSON 输入中的整数只支持到 u64，更大的值使用十六进制串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u128),
    Hex(String),
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self::Number(value as u128)
    }
}

impl From<u128> for Quantity {
    fn from(value: u128) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::Hex(value.to_string())
    }
}

impl From<String> for Quantity {
    fn from(value: String) -> Self {
        Self::Hex(value)
    }
}

/// 原始交易参数（未校验）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
}

impl TransactionParams {
    /// Nick's method 所需的最小参数集
    pub fn deployment(
        gas_price: impl Into<Quantity>,
        gas_limit: impl Into<Quantity>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            gas_price: Some(gas_price.into()),
            gas_limit: Some(gas_limit.into()),
            data: Some(data.into()),
            ..Default::default()
        }
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Quantity>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_nonce(mut self, nonce: impl Into<Quantity>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }
}

/// 完整的 (v, r, s) 签名三元组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureParts {
    pub v: String,
    pub r: String,
    pub s: String,
}

/// 归一化后的交易参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTransactionParams {
    pub nonce: String,
    pub gas_price: String,
    pub gas_limit: String,
    pub value: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(flatten)]
    pub signature: Option<SignatureParts>,
}

/// Nick's method 可选参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NickMethodOptions {
    /// 签名私钥（hex，可带 0x）；缺省使用配置中的默认私钥
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// 链 ID；提供时构建 EIP-155 重放保护交易
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// 覆盖 r（bytes32）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<String>,
    /// 覆盖 s（bytes32）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
}

impl std::fmt::Display for NickMethodOptions {
    // 不输出私钥
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "chain_id={:?} custom_key={} r_override={} s_override={}",
            self.chain_id,
            self.private_key.is_some(),
            self.r.is_some(),
            self.s.is_some()
        )
    }
}

/// Nick's method 构建结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NickMethodResult {
    /// 序列化后的交易（0x hex）
    pub raw_tx: String,
    /// 恢复出的发送者地址（checksum）
    pub sender_address: String,
    /// 合约地址（仅合约创建）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    pub gas_price: String,
    pub gas_limit: String,
    pub r: String,
    pub s: String,
    pub v: String,
}

/// 交易格式标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    /// 类型化信封之前的 legacy 格式
    Legacy,
}

impl TxType {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Legacy => 0,
        }
    }
}
