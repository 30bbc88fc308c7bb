//! 地址推导服务
//!
//! 发送者恢复、重放保护判定、合约地址计算

use ethers::types::{Address, U256};

use crate::{
    domain::{legacy_transaction::LegacyTransaction, transaction_params::TransactionParams},
    error::{CodecError, Result},
    infrastructure::evm_codec::{EthersCodec, TxCodec},
    service::param_validator::ParamValidator,
    utils::{address_validator::AddressValidator, hex_utils},
};

/// 地址推导器
pub struct AddressDeriver<C: TxCodec = EthersCodec> {
    codec: C,
}

impl AddressDeriver<EthersCodec> {
    pub fn new() -> Self {
        Self { codec: EthersCodec }
    }
}

impl Default for AddressDeriver<EthersCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TxCodec> AddressDeriver<C> {
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// 从 `0x` 序列化交易恢复发送者（checksum 格式）
    pub fn recover_sender(&self, raw_tx: &str) -> Result<String> {
        let bytes = hex::decode(hex_utils::strip_0x(raw_tx.trim())).map_err(CodecError::from)?;
        self.recover_sender_bytes(&bytes)
    }

    pub fn recover_sender_bytes(&self, raw_tx: &[u8]) -> Result<String> {
        let tx = self.codec.decode(raw_tx)?;
        let sender = self.codec.recover_sender(&tx)?;
        Ok(self.codec.checksum_address(&sender))
    }

    /// v 是否编码了链 ID
    pub fn is_protected(&self, tx: &LegacyTransaction) -> bool {
        tx.is_protected()
    }

    /// 参数形式：未提供 v 时视为无保护
    pub fn is_protected_params(&self, params: &TransactionParams) -> Result<bool> {
        let tx = ParamValidator::transaction_from_params(params)?;
        Ok(self.is_protected(&tx))
    }

    pub fn is_protected_raw(&self, raw_tx: &str) -> Result<bool> {
        let bytes = hex::decode(hex_utils::strip_0x(raw_tx.trim())).map_err(CodecError::from)?;
        let tx = self.codec.decode(&bytes)?;
        Ok(self.is_protected(&tx))
    }

    /// keccak256(rlp([sender, nonce]))[12..]，checksum 格式
    pub fn contract_address(&self, sender: &Address, nonce: U256) -> String {
        let contract = self.codec.derive_contract_address(sender, nonce);
        self.codec.checksum_address(&contract)
    }

    /// 统一为 checksum 格式；已是合法 checksum 的地址原样返回
    pub fn normalize_address(&self, address: &str) -> Option<String> {
        if AddressValidator::is_valid_checksum(address) {
            return Some(address.to_string());
        }
        AddressValidator::parse(address).map(|parsed| self.codec.checksum_address(&parsed))
    }
}
