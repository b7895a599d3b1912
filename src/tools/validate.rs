//! 发票校验工具
//!
//! 三项检查：金额必须为正、币种在白名单内、due_date 不早于今天 - max_invoice_age_days。

use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

use crate::domain::{Invoice, PaymentPolicy};
use crate::tools::{CheckOutcome, Tool};

/// validate_invoice：对发票做金额 / 币种 / 账龄校验
pub struct ValidateInvoiceTool {
    policy: PaymentPolicy,
}

impl ValidateInvoiceTool {
    pub fn new(policy: PaymentPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Tool for ValidateInvoiceTool {
    fn name(&self) -> &str {
        "validate_invoice"
    }

    fn description(&self) -> &str {
        "Validate an invoice (amount, currency, age). Args: invoice JSON."
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

        if invoice.amount_cents <= 0 {
            return CheckOutcome::fail("Invalid invoice amount.").into_observation();
        }
        if !self.policy.supports_currency(&invoice.currency) {
            return CheckOutcome::fail(format!("Unsupported currency {}.", invoice.currency))
                .into_observation();
        }
        let today = Local::now().date_naive();
        if invoice.due_date < self.policy.oldest_acceptable_due_date(today) {
            return CheckOutcome::fail("Invoice is too old.").into_observation();
        }
        CheckOutcome::pass("Invoice validated.").into_observation()
    }
}
