//! 测试辅助模块
//! 提供黄金向量与常用参数

#![allow(dead_code)]

use nicks_method::domain::TransactionParams;

/// 默认私钥、gasPrice=100、gasLimit=100000、data=0x00、无链 ID
pub const GOLDEN_RAW_TX: &str = "0xf84c8064830186a08080001ba01212121212121212121212121212121212121212121212121212121212121212a0435b07f53683abf00f660b0f1e9815d369f3e417fbb777b95c1bd8aa5489a3dd";
pub const GOLDEN_SENDER: &str = "0xfE4BDF04a866fA6f0cC0953159bc7812Ab4488F8";
pub const GOLDEN_CONTRACT: &str = "0xF1A634BdBBA7Eb7371e1cDD8f441669AC6BAfF00";

/// 同上参数，chainId=1
pub const MAINNET_RAW_TX: &str = "0xf84c8064830186a080800025a01212121212121212121212121212121212121212121212121212121212121212a00999c0101181263054cdbb86cc3310a8ede8e4d2e08deef23f48c31c20219d02";
pub const MAINNET_SENDER: &str = "0x71Bf2DaE329F67Bc4A10a4c4458Ad2B0238Cf4dB";
pub const MAINNET_CONTRACT: &str = "0xED1fEFd53FA18CF96597D5006619aAba1204c8F0";

/// 黄金向量参数
pub fn golden_params() -> TransactionParams {
    TransactionParams::deployment(100u64, 100_000u64, "0x00")
}

pub fn bytes32(byte: &str) -> String {
    format!("0x{}", byte.repeat(32))
}
