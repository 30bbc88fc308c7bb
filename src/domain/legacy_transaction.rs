//! Legacy 交易模型
//!
//! 字段顺序: [nonce, gasPrice, gasLimit, to, value, data, v, r, s]
//! 签名载荷: 无重放保护时为前 6 个字段；EIP-155 时追加 [chainId, 0, 0]

use ethers::{
    types::{Address, Signature, H256, U256},
    utils::keccak256,
};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::error::{CodecError, NickMethodError, Result};

/// 未签名字段数
pub const LEGACY_BASE_FIELDS: usize = 6;
/// 完整交易字段数
pub const LEGACY_SIGNED_FIELDS: usize = 9;
/// 无重放保护的 v 值
pub const UNPROTECTED_V_EVEN: u64 = 27;
pub const UNPROTECTED_V_ODD: u64 = 28;
/// EIP-155 v 偏移: v = recovery_id + chain_id * 2 + 35
pub const EIP155_V_OFFSET: u64 = 35;

/// v 仍可用 u64 表示的最大链 ID
pub const MAX_CHAIN_ID: u64 = (u64::MAX - EIP155_V_OFFSET - 1) / 2;

/// secp256k1n / 2（高 s 值无效）
const SECP256K1N_HALF: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Legacy 交易
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
    /// None 表示合约创建
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    /// 签名所用的链 ID（None 为无重放保护）
    pub chain_id: Option<u64>,
    pub signature: Option<Signature>,
}

/// 从 EIP-155 v 值中提取链 ID
pub fn chain_id_from_v(v: u64) -> Option<u64> {
    if v >= EIP155_V_OFFSET {
        Some((v - EIP155_V_OFFSET) / 2)
    } else {
        None
    }
}

impl LegacyTransaction {
    fn append_base(&self, s: &mut RlpStream) {
        s.append(&self.nonce);
        s.append(&self.gas_price);
        s.append(&self.gas_limit);
        match &self.to {
            Some(to) => s.append(to),
            None => s.append_empty_data(),
        };
        s.append(&self.value);
        s.append(&self.data);
    }

    /// 签名载荷（RLP）
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut s = RlpStream::new();
        match self.chain_id {
            Some(chain_id) => {
                s.begin_list(LEGACY_SIGNED_FIELDS);
                self.append_base(&mut s);
                s.append(&chain_id);
                s.append(&0u8);
                s.append(&0u8);
            }
            None => {
                s.begin_list(LEGACY_BASE_FIELDS);
                self.append_base(&mut s);
            }
        }
        s.out().to_vec()
    }

    /// 签名哈希 keccak256(signing_payload)
    pub fn signing_hash(&self) -> H256 {
        H256::from(keccak256(self.signing_payload()))
    }

    /// 替换签名（链 ID 与 v 保持一致）
    pub fn with_signature(&self, signature: Signature) -> Self {
        let mut tx = self.clone();
        tx.chain_id = chain_id_from_v(signature.v);
        tx.signature = Some(signature);
        tx
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// 是否带 EIP-155 重放保护
    pub fn is_protected(&self) -> bool {
        match &self.signature {
            Some(sig) => sig.v >= EIP155_V_OFFSET,
            None => self.chain_id.is_some(),
        }
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    /// 序列化
    pub fn to_bytes(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// 反序列化 legacy 交易；类型化信封直接拒绝
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, CodecError> {
        let first = *bytes.first().ok_or(CodecError::EmptyPayload)?;
        if first <= 0x7f {
            return Err(CodecError::UnsupportedEnvelope(first));
        }

        let rlp = Rlp::new(bytes);
        let expected = rlp.payload_info()?.total();
        if expected != bytes.len() {
            return Err(CodecError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(rlp.as_val()?)
    }

    /// 从签名恢复发送者
    pub fn recover_sender(&self) -> std::result::Result<Address, CodecError> {
        let signature = self
            .signature
            .ok_or(CodecError::Signature(ethers::types::SignatureError::RecoveryError))?;
        Ok(signature.recover(self.signing_hash())?)
    }

    /// 签名分量范围：r、s 非零且 s 不超过 secp256k1n/2
    pub fn check_signature_range(&self) -> std::result::Result<(), CodecError> {
        let sig = match &self.signature {
            Some(sig) => sig,
            None => return Ok(()),
        };
        if sig.r.is_zero() || sig.s.is_zero() {
            return Err(CodecError::InvalidSignature(
                "r and s must be non-zero".to_string(),
            ));
        }
        if sig.s > U256::from_big_endian(&SECP256K1N_HALF) {
            return Err(CodecError::InvalidSignature(
                "s-values greater than secp256k1n/2 are considered invalid".to_string(),
            ));
        }
        Ok(())
    }

    /// 结构约束校验（数值范围之外的约束）
    pub fn validate_structure(&self) -> Result<()> {
        if self.gas_limit.checked_mul(self.gas_price).is_none() {
            return Err(NickMethodError::validation(
                "gasLimit * gasPrice cannot exceed MAX_INTEGER (2^256-1)",
            ));
        }

        if let Some(sig) = &self.signature {
            let v = sig.v;
            if v != UNPROTECTED_V_EVEN && v != UNPROTECTED_V_ODD && v < EIP155_V_OFFSET + 2 {
                return Err(NickMethodError::validation(format!(
                    "Invalid 'v' value: {} (expected 27, 28 or an EIP-155 value)",
                    v
                )));
            }
            if let (Some(chain_id), Some(expected)) = (self.chain_id, chain_id_from_v(v)) {
                if chain_id != expected {
                    return Err(NickMethodError::validation(format!(
                        "'v' encodes chain id {} but transaction targets chain id {}",
                        expected, chain_id
                    )));
                }
            }
            if sig.s > U256::from_big_endian(&SECP256K1N_HALF) {
                return Err(NickMethodError::validation(
                    "Invalid Signature: s-values greater than secp256k1n/2 are considered invalid",
                ));
            }
        }

        Ok(())
    }
}

impl Encodable for LegacyTransaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(LEGACY_SIGNED_FIELDS);
        self.append_base(s);
        match &self.signature {
            Some(sig) => {
                s.append(&sig.v);
                s.append(&sig.r);
                s.append(&sig.s);
            }
            None => {
                s.append_empty_data();
                s.append_empty_data();
                s.append_empty_data();
            }
        }
    }
}

impl Decodable for LegacyTransaction {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        if !rlp.is_list() {
            return Err(DecoderError::RlpExpectedToBeList);
        }
        if rlp.item_count()? != LEGACY_SIGNED_FIELDS {
            return Err(DecoderError::RlpIncorrectListLen);
        }

        let to_rlp = rlp.at(3)?;
        let to = if to_rlp.is_empty() {
            None
        } else {
            Some(to_rlp.as_val::<Address>()?)
        };

        let v: u64 = rlp.val_at(6)?;
        let r: U256 = rlp.val_at(7)?;
        let s: U256 = rlp.val_at(8)?;
        let signature = if v == 0 && r.is_zero() && s.is_zero() {
            None
        } else {
            Some(Signature { r, s, v })
        };

        Ok(Self {
            nonce: rlp.val_at(0)?,
            gas_price: rlp.val_at(1)?,
            gas_limit: rlp.val_at(2)?,
            to,
            value: rlp.val_at(4)?,
            data: rlp.val_at(5)?,
            chain_id: signature.as_ref().and_then(|sig| chain_id_from_v(sig.v)),
            signature,
        })
    }
}
