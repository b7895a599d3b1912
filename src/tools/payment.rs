//! 支付执行与排期工具
//!
//! execute_payment 扣减共享账户并返回交易号；schedule_payment 只登记排期引用（SCH-前缀），
//! 金额 <= 0 时两者都是无操作成功。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{cents_to_display, Account};
use crate::tools::{ExecuteOutcome, ScheduleOutcome, Tool};

#[derive(Deserialize)]
struct ExecuteArgs {
    amount_cents: i64,
    currency: String,
}

/// execute_payment：立即扣款；余额不足视为执行失败（Err）
pub struct ExecutePaymentTool {
    account: Arc<Mutex<Account>>,
}

impl ExecutePaymentTool {
    pub fn new(account: Arc<Mutex<Account>>) -> Self {
        Self { account }
    }
}

#[async_trait]
impl Tool for ExecutePaymentTool {
    fn name(&self) -> &str {
        "execute_payment"
    }

    fn description(&self) -> &str {
        "Execute an immediate payment from the operating account. Args: {\"amount_cents\": 18000, \"currency\": \"USD\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "amount_cents": { "type": "integer" },
                "currency": { "type": "string" }
            },
            "required": ["amount_cents", "currency"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let args: ExecuteArgs =
            serde_json::from_value(args).map_err(|e| format!("Invalid args: {e}"))?;

        if args.amount_cents <= 0 {
            let outcome = ExecuteOutcome {
                msg: "Nothing to execute.".to_string(),
                txn_id: uuid::Uuid::new_v4().to_string(),
                amount_cents: 0,
            };
            return serde_json::to_string(&outcome).map_err(|e| e.to_string());
        }

        {
            let mut acct = self
                .account
                .lock()
                .map_err(|_| "account lock poisoned".to_string())?;
            acct.debit(args.amount_cents)?;
        }

        let outcome = ExecuteOutcome {
            msg: format!(
                "Executed {} {}.",
                cents_to_display(args.amount_cents),
                args.currency
            ),
            txn_id: uuid::Uuid::new_v4().to_string(),
            amount_cents: args.amount_cents,
        };
        serde_json::to_string(&outcome).map_err(|e| e.to_string())
    }
}

#[derive(Deserialize)]
struct ScheduleArgs {
    amount_cents: i64,
    currency: String,
    date: NaiveDate,
}

/// schedule_payment：登记一笔未来支付，返回 SCH- 前缀的排期引用
pub struct SchedulePaymentTool;

impl SchedulePaymentTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SchedulePaymentTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SchedulePaymentTool {
    fn name(&self) -> &str {
        "schedule_payment"
    }

    fn description(&self) -> &str {
        "Schedule a future payment. Args: {\"amount_cents\": 7000, \"currency\": \"USD\", \"date\": \"2026-08-26\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "amount_cents": { "type": "integer" },
                "currency": { "type": "string" },
                "date": { "type": "string", "format": "date" }
            },
            "required": ["amount_cents", "currency", "date"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let args: ScheduleArgs =
            serde_json::from_value(args).map_err(|e| format!("Invalid args: {e}"))?;

        if args.amount_cents <= 0 {
            let outcome = ScheduleOutcome {
                msg: "Nothing to schedule.".to_string(),
                schedule_id: uuid::Uuid::new_v4().to_string(),
                amount_cents: 0,
            };
            return serde_json::to_string(&outcome).map_err(|e| e.to_string());
        }

        let outcome = ScheduleOutcome {
            msg: format!(
                "Scheduled {} {} for {}.",
                cents_to_display(args.amount_cents),
                args.currency,
                args.date
            ),
            schedule_id: format!("SCH-{}", uuid::Uuid::new_v4()),
            amount_cents: args.amount_cents,
        };
        serde_json::to_string(&outcome).map_err(|e| e.to_string())
    }
}
