//! EVM 交易编解码与密码学协作方
//!
//! 核心逻辑只通过 `TxCodec` 使用签名、公钥恢复、RLP 编解码、
//! Keccak 哈希、checksum 与合约地址推导

use ethers::{
    signers::LocalWallet,
    types::{Address, Signature, U256},
};

use crate::{
    domain::legacy_transaction::{LegacyTransaction, EIP155_V_OFFSET, UNPROTECTED_V_EVEN},
    error::CodecError,
};

/// 编解码协作方接口
pub trait TxCodec: Send + Sync {
    /// 序列化交易
    fn encode(&self, tx: &LegacyTransaction) -> Vec<u8>;

    /// 反序列化交易
    fn decode(&self, bytes: &[u8]) -> Result<LegacyTransaction, CodecError>;

    /// 对交易签名哈希签名，返回 (v, r, s)
    ///
    /// `tx.chain_id` 为 Some 时返回 EIP-155 v，否则返回 27/28
    fn sign(&self, tx: &LegacyTransaction, key: &LocalWallet) -> Result<Signature, CodecError>;

    /// 通过 (v, r, s) 与签名哈希恢复发送者
    fn recover_sender(&self, tx: &LegacyTransaction) -> Result<Address, CodecError>;

    /// EIP-55 混合大小写地址
    fn checksum_address(&self, address: &Address) -> String;

    /// keccak256(rlp([sender, nonce]))[12..]
    fn derive_contract_address(&self, sender: &Address, nonce: U256) -> Address;

    fn keccak256(&self, data: &[u8]) -> [u8; 32];
}

/// 基于 ethers 的默认实现
#[derive(Debug, Clone, Copy, Default)]
pub struct EthersCodec;

impl TxCodec for EthersCodec {
    fn encode(&self, tx: &LegacyTransaction) -> Vec<u8> {
        tx.to_bytes()
    }

    fn decode(&self, bytes: &[u8]) -> Result<LegacyTransaction, CodecError> {
        LegacyTransaction::from_bytes(bytes)
    }

    fn sign(&self, tx: &LegacyTransaction, key: &LocalWallet) -> Result<Signature, CodecError> {
        // RFC6979 确定性 nonce，相同输入得到相同签名
        let mut signature = key.sign_hash(tx.signing_hash())?;

        if let Some(chain_id) = tx.chain_id {
            let recovery_id = signature.v - UNPROTECTED_V_EVEN;
            signature.v = chain_id
                .checked_mul(2)
                .and_then(|v| v.checked_add(recovery_id + EIP155_V_OFFSET))
                .ok_or(CodecError::ChainIdOutOfRange(chain_id))?;
        }

        Ok(signature)
    }

    fn recover_sender(&self, tx: &LegacyTransaction) -> Result<Address, CodecError> {
        tx.recover_sender()
    }

    fn checksum_address(&self, address: &Address) -> String {
        ethers::utils::to_checksum(address, None)
    }

    fn derive_contract_address(&self, sender: &Address, nonce: U256) -> Address {
        ethers::utils::get_contract_address(*sender, nonce)
    }

    fn keccak256(&self, data: &[u8]) -> [u8; 32] {
        ethers::utils::keccak256(data)
    }
}
