//! 诊断输出通道
//!
//! 仅在配置显式开启时输出，事件 target 固定为 `nicks_method::diagnostics`

use crate::config::DiagnosticsConfig;

pub const DIAGNOSTICS_TARGET: &str = "nicks_method::diagnostics";

/// 可关闭的诊断通道
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    enabled: bool,
}

impl Diagnostics {
    pub fn new(config: &DiagnosticsConfig) -> Self {
        Self {
            enabled: config.enabled,
        }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 合约地址推导
    pub fn contract_address_derived(&self, sender: &str, nonce: &str, contract_address: &str) {
        if !self.enabled {
            return;
        }
        tracing::debug!(
            target: DIAGNOSTICS_TARGET,
            sender = %sender,
            nonce = %nonce,
            contract_address = %contract_address,
            "contract address derived"
        );
    }
}
