//! Domain 模块
//!
//! 交易参数与 legacy 交易模型

pub mod legacy_transaction;
pub mod transaction_params;

// 重新导出常用类型
pub use legacy_transaction::LegacyTransaction;
pub use transaction_params::{
    NickMethodOptions, NickMethodResult, NormalizedTransactionParams, Quantity, SignatureParts,
    TransactionParams, TxType,
};
