//! Nick's method 交易构建器
//!
//! 两遍构建：先对临时交易正常签名，再把 (v, r, s) 替换为确定值后重新编码。
//! 发送者由替换后的签名恢复得到，任何人都不持有它的私钥。
//!
//! # 流程
//! 1. 校验/归一化参数（nonce 必须为零）
//! 2. 解析签名私钥（调用方提供或配置中的公开默认私钥）
//! 3. 构建临时交易：nonce=0, to, gasPrice, gasLimit, value, data
//! 4. 有链 ID 时使用 EIP-155 签名载荷，否则无重放保护
//! 5. 签名
//! 6. 替换签名：v=27 或真实 EIP-155 v；r=覆盖值或规范常量；s=覆盖值或真实 s
//! 7. 重新编码
//! 8. 恢复发送者
//! 9. 合约创建时推导合约地址（nonce=0）

use ethers::{
    core::k256::ecdsa::SigningKey,
    signers::LocalWallet,
    types::{Address, Signature, U256},
};

use crate::{
    config::{Config, SignerConfig},
    domain::{
        legacy_transaction::{LegacyTransaction, MAX_CHAIN_ID, UNPROTECTED_V_EVEN},
        transaction_params::{NickMethodOptions, NickMethodResult, TransactionParams},
    },
    error::{NickMethodError, Result},
    infrastructure::{
        diagnostics::Diagnostics,
        evm_codec::{EthersCodec, TxCodec},
    },
    service::param_validator::ParamValidator,
    utils::hex_utils,
};


/// 交易种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NickTxKind {
    /// 普通调用，保留 `to`
    MessageCall,
    /// 合约创建，忽略 `to` 并推导合约地址
    ContractCreation,
}

/// Nick's method 交易构建器
pub struct NickMethodTxBuilder<C: TxCodec = EthersCodec> {
    signer: SignerConfig,
    diagnostics: Diagnostics,
    codec: C,
}

/// 构建中间结果
struct DeterministicTx {
    tx: LegacyTransaction,
    raw: Vec<u8>,
    sender: Address,
}

impl NickMethodTxBuilder<EthersCodec> {
    /// 使用公开默认配置创建构建器（不读取环境变量，诊断关闭）
    pub fn new() -> Self {
        Self::with_codec(SignerConfig::canonical(), Diagnostics::disabled(), EthersCodec)
    }

    /// 从应用配置创建构建器
    pub fn from_config(config: &Config) -> Self {
        Self::with_codec(
            config.signer.clone(),
            Diagnostics::new(&config.diagnostics),
            EthersCodec,
        )
    }
}

impl Default for NickMethodTxBuilder<EthersCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TxCodec> NickMethodTxBuilder<C> {
    pub fn with_codec(signer: SignerConfig, diagnostics: Diagnostics, codec: C) -> Self {
        Self {
            signer,
            diagnostics,
            codec,
        }
    }

    pub fn signer_config(&self) -> &SignerConfig {
        &self.signer
    }

    /// 构建普通调用交易
    pub fn build_message_call(
        &self,
        params: &TransactionParams,
        options: &NickMethodOptions,
    ) -> Result<NickMethodResult> {
        self.build(params, options, NickTxKind::MessageCall)
    }

    /// 构建合约创建交易并推导合约地址
    pub fn build_contract_deployment(
        &self,
        params: &TransactionParams,
        options: &NickMethodOptions,
    ) -> Result<NickMethodResult> {
        self.build(params, options, NickTxKind::ContractCreation)
    }

    /// 构建交易
    pub fn build(
        &self,
        params: &TransactionParams,
        options: &NickMethodOptions,
        kind: NickTxKind,
    ) -> Result<NickMethodResult> {
        tracing::debug!(kind = ?kind, options = %options, "building nick's method transaction");

        let built = self.build_deterministic(params, options, kind)?;
        let signature = built
            .tx
            .signature
            .ok_or_else(|| NickMethodError::validation("transaction was not signed"))?;

        let sender_address = self.codec.checksum_address(&built.sender);
        let contract_address = match kind {
            NickTxKind::MessageCall => None,
            NickTxKind::ContractCreation => Some(self.contract_address(&built.sender)),
        };

        tracing::debug!(
            sender = %sender_address,
            protected = built.tx.is_protected(),
            contract = ?contract_address,
            "deterministic transaction built"
        );

        Ok(NickMethodResult {
            raw_tx: format!("0x{}", hex::encode(&built.raw)),
            sender_address,
            contract_address,
            gas_price: hex_utils::to_minimal_hex(built.tx.gas_price),
            gas_limit: hex_utils::to_minimal_hex(built.tx.gas_limit),
            r: hex_utils::to_bytes32_hex(signature.r),
            s: hex_utils::to_bytes32_hex(signature.s),
            v: hex_utils::to_minimal_hex(U256::from(signature.v)),
        })
    }

    fn build_deterministic(
        &self,
        params: &TransactionParams,
        options: &NickMethodOptions,
        kind: NickTxKind,
    ) -> Result<DeterministicTx> {
        // 1. 参数校验（在任何密码学运算之前完成）
        let normalized = ParamValidator::normalize_for_deployment(params)?;
        let r_override = options
            .r
            .as_deref()
            .map(|r| ParamValidator::validate_bytes32(r, "r"))
            .transpose()?;
        let s_override = options
            .s
            .as_deref()
            .map(|s| ParamValidator::validate_bytes32(s, "s"))
            .transpose()?;
        let canonical_r = ParamValidator::validate_bytes32(&self.signer.canonical_r, "canonical r")?;
        // 链 ID 0 视为未提供
        let chain_id = options.chain_id.filter(|id| *id != 0);
        if let Some(id) = chain_id {
            if id > MAX_CHAIN_ID {
                return Err(NickMethodError::validation(format!(
                    "chainId {} is too large to be encoded into 'v' (max {})",
                    id, MAX_CHAIN_ID
                )));
            }
        }

        // 2. 私钥
        let wallet = self.resolve_signing_key(options)?;

        // 3/4. 临时交易
        let mut provisional = ParamValidator::to_transaction(&normalized)?;
        provisional.nonce = U256::zero();
        provisional.signature = None;
        provisional.chain_id = chain_id;
        if kind == NickTxKind::ContractCreation {
            provisional.to = None;
        }

        // 5. 签名
        let real = self.codec.sign(&provisional, &wallet)?;

        // 6. 替换签名
        let substituted = Signature {
            v: if chain_id.is_some() {
                real.v
            } else {
                UNPROTECTED_V_EVEN
            },
            r: r_override.unwrap_or(canonical_r),
            s: s_override.unwrap_or(real.s),
        };

        // 7. 重新编码；替换后的签名必须仍是合法签名
        let tx = provisional.with_signature(substituted);
        tx.check_signature_range()?;
        let raw = self.codec.encode(&tx);

        // 8. 恢复发送者
        let sender = self.codec.recover_sender(&tx)?;

        Ok(DeterministicTx { tx, raw, sender })
    }

    /// 合约地址：keccak256(rlp([sender, 0]))[12..]
    fn contract_address(&self, sender: &Address) -> String {
        let nonce = U256::zero();
        let contract = self.codec.derive_contract_address(sender, nonce);
        let contract_address = self.codec.checksum_address(&contract);

        self.diagnostics.contract_address_derived(
            &self.codec.checksum_address(sender),
            &hex_utils::to_minimal_hex(nonce),
            &contract_address,
        );

        contract_address
    }

    /// 解析签名私钥
    fn resolve_signing_key(&self, options: &NickMethodOptions) -> Result<LocalWallet> {
        let raw = options
            .private_key
            .as_deref()
            .unwrap_or(&self.signer.default_private_key);
        let key_hex = hex_utils::strip_0x(raw.trim());

        if !is_valid_private_key(key_hex, self.signer.strict_private_key_check) {
            return Err(NickMethodError::validation(
                "The private key provided is not a valid private key",
            ));
        }

        // 宽松模式下格式错误的私钥在这里才被发现，仍按校验错误上报
        let bytes = hex::decode(key_hex).map_err(|_| {
            NickMethodError::validation("The private key provided is not a valid private key")
        })?;
        let signing_key = SigningKey::from_slice(&bytes).map_err(|_| {
            NickMethodError::validation("The private key provided is not a valid private key")
        })?;

        Ok(LocalWallet::from(signing_key))
    }
}

/// 私钥预校验
///
/// 非严格模式下总是通过（历史行为）；严格模式检查 32 字节且位于曲线阶之内
pub fn is_valid_private_key(key_hex: &str, strict: bool) -> bool {
    if !strict {
        return true;
    }

    match hex::decode(hex_utils::strip_0x(key_hex)) {
        Ok(bytes) => bytes.len() == 32 && k256::SecretKey::from_slice(&bytes).is_ok(),
        Err(_) => false,
    }
}
