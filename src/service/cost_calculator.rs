//! 交易费用计算
//!
//! 使用任意精度整数，256 位操作数相乘不会溢出

use ethers::types::U256;
use num_bigint::BigUint;

use crate::{domain::transaction_params::TransactionParams, error::Result};

use super::param_validator::ParamValidator;

/// 费用计算器
pub struct CostCalculator;

impl CostCalculator {
    /// gasLimit * gasPrice + value
    pub fn upfront_cost(params: &TransactionParams) -> Result<BigUint> {
        let tx = ParamValidator::transaction_from_params(params)?;
        Ok(Self::cost(tx.gas_limit, tx.gas_price, tx.value))
    }

    /// gasLimit * gasPrice（value 视为零）
    pub fn gas_cost(params: &TransactionParams) -> Result<BigUint> {
        let tx = ParamValidator::transaction_from_params(params)?;
        Ok(Self::cost(tx.gas_limit, tx.gas_price, U256::zero()))
    }

    fn cost(gas_limit: U256, gas_price: U256, value: U256) -> BigUint {
        to_biguint(gas_limit) * to_biguint(gas_price) + to_biguint(value)
    }
}

fn to_biguint(value: U256) -> BigUint {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    BigUint::from_bytes_be(&buf)
}
