//! 付款账户

use serde::{Deserialize, Serialize};

/// 运营账户：余额、单日限额与当日已支出（均为分）
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub balance_cents: i64,
    pub daily_limit_cents: i64,
    #[serde(default)]
    pub spent_today_cents: i64,
}

impl Account {
    pub fn new(account_id: impl Into<String>, balance_cents: i64, daily_limit_cents: i64) -> Self {
        Self {
            account_id: account_id.into(),
            balance_cents,
            daily_limit_cents,
            spent_today_cents: 0,
        }
    }

    /// 当日剩余可支出额度（不小于 0）
    pub fn remaining_daily_limit(&self) -> i64 {
        (self.daily_limit_cents - self.spent_today_cents).max(0)
    }

    /// 扣款并计入当日支出；余额不足时返回 Err 且不产生任何变更
    pub fn debit(&mut self, cents: i64) -> Result<(), String> {
        if self.balance_cents < cents {
            return Err("Execution failed: insufficient funds.".to_string());
        }
        self.balance_cents -= cents;
        self.spent_today_cents = self.spent_today_cents.saturating_add(cents);
        Ok(())
    }
}
