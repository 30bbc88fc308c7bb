pub mod address_deriver; // 发送者恢复 / 合约地址
pub mod cost_calculator;
pub mod param_validator;
pub mod transaction_builder; // Nick's method 构建器
pub mod tx_introspector;

pub use address_deriver::AddressDeriver;
pub use cost_calculator::CostCalculator;
pub use param_validator::ParamValidator;
pub use transaction_builder::{NickMethodTxBuilder, NickTxKind};
pub use tx_introspector::TxIntrospector;
