//! 资金检查工具：余额与当日限额
//!
//! 两者都是参考性检查：不通过不会终止 Episode，由 propose_plan 决定拆分或排期。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Account;
use crate::tools::{CheckOutcome, Tool};

fn amount_cents_from(args: &Value) -> Result<i64, String> {
    args.get("amount_cents")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| "Invalid args: missing amount_cents".to_string())
}

fn lock_account(account: &Arc<Mutex<Account>>) -> Result<std::sync::MutexGuard<'_, Account>, String> {
    account.lock().map_err(|_| "account lock poisoned".to_string())
}

/// check_balance：余额是否覆盖指定金额
pub struct CheckBalanceTool {
    account: Arc<Mutex<Account>>,
}

impl CheckBalanceTool {
    pub fn new(account: Arc<Mutex<Account>>) -> Self {
        Self { account }
    }
}

#[async_trait]
impl Tool for CheckBalanceTool {
    fn name(&self) -> &str {
        "check_balance"
    }

    fn description(&self) -> &str {
        "Check whether the account balance covers an amount. Args: {\"amount_cents\": 25000}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": { "amount_cents": { "type": "integer" } },
            "required": ["amount_cents"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let amount = amount_cents_from(&args)?;
        let acct = lock_account(&self.account)?;
        if acct.balance_cents >= amount {
            CheckOutcome::pass("Sufficient balance.").into_observation()
        } else {
            CheckOutcome::fail("Insufficient balance.").into_observation()
        }
    }
}

/// check_daily_limit：当日已支出 + 金额是否仍在单日限额内
pub struct CheckDailyLimitTool {
    account: Arc<Mutex<Account>>,
}

impl CheckDailyLimitTool {
    pub fn new(account: Arc<Mutex<Account>>) -> Self {
        Self { account }
    }
}

#[async_trait]
impl Tool for CheckDailyLimitTool {
    fn name(&self) -> &str {
        "check_daily_limit"
    }

    fn description(&self) -> &str {
        "Check whether an amount fits the daily spending limit. Args: {\"amount_cents\": 25000}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": { "amount_cents": { "type": "integer" } },
            "required": ["amount_cents"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let amount = amount_cents_from(&args)?;
        let acct = lock_account(&self.account)?;
        // saturating：极大金额不得溢出，按超限处理
        if acct.spent_today_cents.saturating_add(amount) <= acct.daily_limit_cents {
            CheckOutcome::pass("Within daily limit.").into_observation()
        } else {
            CheckOutcome::fail("Exceeds daily limit.").into_observation()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(balance: i64, limit: i64, spent: i64) -> Arc<Mutex<Account>> {
        let mut acct = Account::new("OPERATING-USD", balance, limit);
        acct.spent_today_cents = spent;
        Arc::new(Mutex::new(acct))
    }

    async fn check(tool: &dyn Tool, amount_cents: i64) -> CheckOutcome {
        let obs = tool
            .execute(serde_json::json!({ "amount_cents": amount_cents }))
            .await
            .unwrap();
        serde_json::from_str(&obs).unwrap()
    }

    #[tokio::test]
    async fn test_balance_sufficient() {
        let tool = CheckBalanceTool::new(account(50000, 50000, 0));
        let outcome = check(&tool, 25000).await;
        assert!(outcome.ok);
        assert_eq!(outcome.msg, "Sufficient balance.");
    }

    #[tokio::test]
    async fn test_balance_insufficient() {
        let tool = CheckBalanceTool::new(account(18000, 50000, 0));
        let outcome = check(&tool, 25000).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.msg, "Insufficient balance.");
    }

    #[tokio::test]
    async fn test_daily_limit_within() {
        let tool = CheckDailyLimitTool::new(account(50000, 50000, 10000));
        let outcome = check(&tool, 25000).await;
        assert!(outcome.ok);
        assert_eq!(outcome.msg, "Within daily limit.");
    }

    #[tokio::test]
    async fn test_daily_limit_exceeded() {
        let tool = CheckDailyLimitTool::new(account(50000, 30000, 10000));
        let outcome = check(&tool, 25000).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.msg, "Exceeds daily limit.");
    }

    #[tokio::test]
    async fn test_daily_limit_huge_amount_does_not_overflow() {
        let tool = CheckDailyLimitTool::new(account(50000, 30000, 10000));
        let outcome = check(&tool, i64::MAX).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.msg, "Exceeds daily limit.");
    }
}
