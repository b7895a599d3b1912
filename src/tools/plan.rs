//! 支付计划工具
//!
//! 读取账户现状，调用 domain::plan 的确定性 propose，观察为 {msg, plan} JSON。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

use crate::domain::{Account, Invoice, PaymentPlan, PaymentPolicy};
use crate::tools::{PlanOutcome, Tool};

/// propose_plan：根据余额与当日剩余额度生成立即/排期拆分
pub struct ProposePlanTool {
    policy: PaymentPolicy,
    account: Arc<Mutex<Account>>,
}

impl ProposePlanTool {
    pub fn new(policy: PaymentPolicy, account: Arc<Mutex<Account>>) -> Self {
        Self { policy, account }
    }
}

#[async_trait]
impl Tool for ProposePlanTool {
    fn name(&self) -> &str {
        "propose_plan"
    }

    fn description(&self) -> &str {
        "Propose a payment plan (immediate + scheduled split). Args: invoice JSON."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "invoice_id": { "type": "string" },
                "vendor_id": { "type": "string" },
                "amount_cents": { "type": "integer" },
                "currency": { "type": "string" },
                "due_date": { "type": "string", "format": "date" },
                "memo": { "type": "string" }
            },
            "required": ["invoice_id", "vendor_id", "amount_cents", "currency", "due_date"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let invoice: Invoice =
            serde_json::from_value(args).map_err(|e| format!("Invalid args: {e}"))?;
        let schedule_date = self.policy.schedule_date(Local::now().date_naive());
        let snapshot = self
            .account
            .lock()
            .map_err(|_| "account lock poisoned".to_string())?
            .clone();

        let proposal = PaymentPlan::propose(&invoice, &snapshot, schedule_date);
        let outcome = PlanOutcome {
            msg: proposal.message.to_string(),
            plan: proposal.plan,
        };
        serde_json::to_string(&outcome).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn invoice_args(amount_cents: i64) -> Value {
        serde_json::json!({
            "invoice_id": "INV-1001",
            "vendor_id": "ACME_CO",
            "amount_cents": amount_cents,
            "currency": "USD",
            "due_date": "2026-09-01",
            "memo": ""
        })
    }

    #[tokio::test]
    async fn test_plan_tool_splits_on_short_balance() {
        let account = Arc::new(Mutex::new(Account::new("OPERATING-USD", 18000, 50000)));
        let tool = ProposePlanTool::new(PaymentPolicy::default(), account);
        let obs = tool.execute(invoice_args(25000)).await.unwrap();
        let outcome: PlanOutcome = serde_json::from_str(&obs).unwrap();
        assert_eq!(outcome.msg, "Proposed split: partial now, remainder tomorrow.");
        assert_eq!(outcome.plan.immediate_cents, 18000);
        assert_eq!(outcome.plan.scheduled_cents, 7000);

        let expected: NaiveDate = Local::now().date_naive() + Duration::days(1);
        assert_eq!(outcome.plan.scheduled_date, Some(expected));
    }

    #[tokio::test]
    async fn test_plan_tool_schema_matches_invoice_args() {
        let account = Arc::new(Mutex::new(Account::new("OPERATING-USD", 18000, 50000)));
        let tool = ProposePlanTool::new(PaymentPolicy::default(), account);
        // schema 声明的必填字段与 execute 反序列化的 Invoice 一致
        let schema = tool.parameters_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["invoice_id", "vendor_id", "amount_cents", "currency", "due_date"]
        );
        let args = invoice_args(25000);
        for field in &required {
            assert!(args.get(field).is_some());
        }
        assert!(tool.execute(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_plan_tool_full_payment_when_funds_cover() {
        let account = Arc::new(Mutex::new(Account::new("OPERATING-USD", 50000, 50000)));
        let tool = ProposePlanTool::new(PaymentPolicy::default(), account);
        let obs = tool.execute(invoice_args(25000)).await.unwrap();
        let outcome: PlanOutcome = serde_json::from_str(&obs).unwrap();
        assert_eq!(outcome.msg, "Proposed full payment now.");
        assert_eq!(outcome.plan.immediate_cents, 25000);
        assert_eq!(outcome.plan.scheduled_cents, 0);
    }
}
