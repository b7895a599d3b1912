//! 单次支付 Episode 的状态记忆
//!
//! Reasoner 只依赖这里的字段做决策：None 表示对应检查尚未执行。
//! 账户通过 Arc<Mutex<_>> 与工具共享，工具（execute_payment）扣款后此处可读到最新余额。

use std::sync::{Arc, Mutex};

use crate::domain::{Account, Invoice, PaymentPlan};
use crate::memory::AuditLog;

/// Episode 记忆：发票、共享账户句柄、各检查结果与执行进度
pub struct EpisodeMemory {
    pub invoice: Invoice,
    pub account: Arc<Mutex<Account>>,
    /// validate_invoice 结果；None = 未校验
    pub invoice_valid: Option<bool>,
    pub vendor_kyc_ok: Option<bool>,
    pub vendor_aml_ok: Option<bool>,
    /// check_balance 结果（仅供参考：不足时由 propose_plan 拆分，不终止）
    pub balance_ok: Option<bool>,
    /// check_daily_limit 结果（同上，仅供参考）
    pub limit_ok: Option<bool>,
    pub payment_plan: Option<PaymentPlan>,
    /// 已立即支付的金额（分）
    pub executed_cents: i64,
    pub txn_id: Option<String>,
    pub scheduled: bool,
    pub schedule_id: Option<String>,
    /// 检查失败的原因（拒绝 Episode 时最后一条即拒绝理由）
    pub failures: Vec<String>,
    pub audit: AuditLog,
}

impl EpisodeMemory {
    pub fn new(invoice: Invoice, account: Arc<Mutex<Account>>) -> Self {
        Self {
            invoice,
            account,
            invoice_valid: None,
            vendor_kyc_ok: None,
            vendor_aml_ok: None,
            balance_ok: None,
            limit_ok: None,
            payment_plan: None,
            executed_cents: 0,
            txn_id: None,
            scheduled: false,
            schedule_id: None,
            failures: Vec::new(),
            audit: AuditLog::new(),
        }
    }

    /// 记录一次检查失败（审计日志由循环负责写入）
    pub fn record_failure(&mut self, reason: impl Into<String>) {
        self.failures.push(reason.into());
    }

    /// 账户快照（供报表与测试读取）
    pub fn account_snapshot(&self) -> Account {
        self.account
            .lock()
            .map(|a| a.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fresh_memory_has_no_decisions() {
        let invoice = Invoice {
            invoice_id: "INV-1".into(),
            vendor_id: "ACME_CO".into(),
            amount_cents: 1000,
            currency: "USD".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            memo: String::new(),
        };
        let account = Arc::new(Mutex::new(Account::new("A", 1000, 1000)));
        let mem = EpisodeMemory::new(invoice, account);
        assert!(mem.invoice_valid.is_none());
        assert!(mem.vendor_kyc_ok.is_none());
        assert!(mem.payment_plan.is_none());
        assert_eq!(mem.executed_cents, 0);
        assert!(!mem.scheduled);
    }
}
