//! 交易格式识别

use crate::{
    domain::{
        legacy_transaction::LegacyTransaction,
        transaction_params::{TransactionParams, TxType},
    },
    error::Result,
};

use super::param_validator::ParamValidator;

pub struct TxIntrospector;

impl TxIntrospector {
    /// 参数只能构造 legacy 交易
    pub fn get_type(params: &TransactionParams) -> Result<TxType> {
        ParamValidator::transaction_from_params(params)?;
        Ok(TxType::Legacy)
    }

    /// 序列化交易的格式；类型化信封（首字节 < 0xc0）不支持
    pub fn get_type_raw(raw_tx: &[u8]) -> Result<TxType> {
        LegacyTransaction::from_bytes(raw_tx)?;
        Ok(TxType::Legacy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_params_are_legacy() {
        let params = TransactionParams::deployment(100u64, 100_000u64, "0x00");
        let tx_type = TxIntrospector::get_type(&params).unwrap();
        assert_eq!(tx_type, TxType::Legacy);
        assert_eq!(tx_type.as_u8(), 0);
    }

    #[test]
    fn test_raw_legacy() {
        let raw = hex::decode(
            "f84c8064830186a08080001ba01212121212121212121212121212121212121212121212121212121212121212a0435b07f53683abf00f660b0f1e9815d369f3e417fbb777b95c1bd8aa5489a3dd",
        )
        .unwrap();
        assert_eq!(TxIntrospector::get_type_raw(&raw).unwrap(), TxType::Legacy);
    }

    #[test]
    fn test_raw_typed_envelope_rejected() {
        let err = TxIntrospector::get_type_raw(&[0x02, 0xc0]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::NickMethodError::Codec(CodecError::UnsupportedEnvelope(0x02))
        ));
    }
}
