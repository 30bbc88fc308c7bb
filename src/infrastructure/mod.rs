pub mod diagnostics;
pub mod evm_codec;
pub mod logging;

pub use diagnostics::Diagnostics;
pub use evm_codec::{EthersCodec, TxCodec};
