//! 错误类型
//!
//! 两类错误：参数校验错误（在任何密码学运算之前发现）与编解码错误
//! （RLP 编解码、签名、公钥恢复失败时原样透传）

use thiserror::Error;

/// 统一结果类型
pub type Result<T> = std::result::Result<T, NickMethodError>;

/// 核心错误
#[derive(Debug, Error)]
pub enum NickMethodError {
    /// 调用方参数不满足格式或语义约束
    #[error("validation error: {0}")]
    Validation(String),

    /// 底层编解码/签名/恢复失败
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// 编解码协作方错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("rlp decoding failed: {0}")]
    Rlp(#[from] rlp::DecoderError),

    #[error("signature recovery failed: {0}")]
    Signature(#[from] ethers::types::SignatureError),

    #[error("signing failed: {0}")]
    Signing(#[from] ethers::signers::WalletError),

    #[error("unsupported transaction envelope type: 0x{0:02x}")]
    UnsupportedEnvelope(u8),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("chain id {0} cannot be encoded into v")]
    ChainIdOutOfRange(u64),

    #[error("empty transaction payload")]
    EmptyPayload,

    #[error("transaction payload length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl NickMethodError {
    /// 构造校验错误
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// 稳定的错误码（snake_case）
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Codec(_) => "codec_error",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_codec(&self) -> bool {
        matches!(self, Self::Codec(_))
    }
}

impl From<rlp::DecoderError> for NickMethodError {
    fn from(err: rlp::DecoderError) -> Self {
        Self::Codec(CodecError::Rlp(err))
    }
}

impl From<ethers::types::SignatureError> for NickMethodError {
    fn from(err: ethers::types::SignatureError) -> Self {
        Self::Codec(CodecError::Signature(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = NickMethodError::validation("'data' should be a hex string starting with '0x'");
        assert_eq!(err.code(), "validation_failed");
        assert!(err.is_validation());
        assert!(err.to_string().contains("'data'"));

        let err: NickMethodError = CodecError::UnsupportedEnvelope(0x02).into();
        assert_eq!(err.code(), "codec_error");
        assert!(err.is_codec());
        assert_eq!(err.to_string(), "unsupported transaction envelope type: 0x02");
    }

    #[test]
    fn test_rlp_error_is_codec() {
        let err: NickMethodError = rlp::DecoderError::RlpIsTooShort.into();
        assert!(err.is_codec());
    }
}
