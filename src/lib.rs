//! Nick's method - 确定性发送者交易构建
//!
//! 用公开私钥签名后替换 (v, r, s)，得到无人持有私钥的发送者地址，
//! 从而在任意链上以相同地址部署相同字节码

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use error::{CodecError, NickMethodError, Result};
pub use service::NickMethodTxBuilder;

// 统一模块导出
pub mod prelude {
    pub use crate::{
        config::{Config, SignerConfig},
        domain::{NickMethodOptions, NickMethodResult, Quantity, TransactionParams, TxType},
        error::{CodecError, NickMethodError, Result},
        service::{AddressDeriver, CostCalculator, NickMethodTxBuilder, ParamValidator, TxIntrospector},
    };
}
