//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::hex_utils;

/// 公开的默认签名私钥（Nick's method 不需要真实秘密）
pub const DEFAULT_PRIVATE_KEY: &str =
    "fba50ce0ee4e1153be17ee72af257d6e03db9f2bf09f9aa6271ecfab66908b4f";

/// 规范 r 值（与历史已部署交易保持逐字节兼容）
pub const CANONICAL_R: &str =
    "0x1212121212121212121212121212121212121212121212121212121212121212";

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub signer: SignerConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 签名配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
    /// 未显式提供私钥时使用的默认私钥（hex，可带 0x）
    pub default_private_key: String,
    /// 未显式提供 r 时使用的规范 r 值
    pub canonical_r: String,
    /// 是否在签名前执行严格的私钥校验（长度 + 曲线阶）
    #[serde(default)]
    pub strict_private_key_check: bool,
}

/// 诊断输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    pub enabled: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            default_private_key: std::env::var("NICK_DEFAULT_PRIVATE_KEY")
                .unwrap_or_else(|_| DEFAULT_PRIVATE_KEY.into()),
            canonical_r: std::env::var("NICK_CANONICAL_R").unwrap_or_else(|_| CANONICAL_R.into()),
            strict_private_key_check: std::env::var("NICK_STRICT_KEY_CHECK")
                .ok()
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: std::env::var("NICK_DIAGNOSTICS")
                .ok()
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl SignerConfig {
    /// 固定的公开配置，不读取环境变量
    pub fn canonical() -> Self {
        Self {
            default_private_key: DEFAULT_PRIVATE_KEY.into(),
            canonical_r: CANONICAL_R.into(),
            strict_private_key_check: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置（先加载 .env）
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            signer: SignerConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        let key = self.signer.default_private_key.trim_start_matches("0x");
        if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("NICK_DEFAULT_PRIVATE_KEY must be a 32-byte hex string");
        }

        if !hex_utils::is_valid_bytes32(&self.signer.canonical_r) {
            anyhow::bail!("NICK_CANONICAL_R must be a 0x-prefixed 32-byte hex string");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}
