//! 支付计划与确定性计划生成
//!
//! propose：立即支付额 = min(发票金额, 账户余额, 当日剩余额度)；
//! 为 0 则全额排期，有余数则拆分（部分立即 + 剩余排期），否则全额立即支付。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Account, Invoice};

/// 支付计划：立即支付部分 + 可选的排期部分
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentPlan {
    pub total_cents: i64,
    pub currency: String,
    pub immediate_cents: i64,
    #[serde(default)]
    pub scheduled_cents: i64,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
}

/// propose 的结果：计划本体 + 给审计日志的一句话说明
#[derive(Clone, Debug)]
pub struct PlanProposal {
    pub plan: PaymentPlan,
    pub message: &'static str,
}

impl PaymentPlan {
    /// 根据发票、账户现状与排期日期生成确定性支付计划
    pub fn propose(invoice: &Invoice, account: &Account, schedule_date: NaiveDate) -> PlanProposal {
        let mut immediate = invoice.amount_cents.min(account.balance_cents);
        immediate = immediate.min(account.remaining_daily_limit());

        if immediate <= 0 {
            return PlanProposal {
                plan: PaymentPlan {
                    total_cents: invoice.amount_cents,
                    currency: invoice.currency.clone(),
                    immediate_cents: 0,
                    scheduled_cents: invoice.amount_cents,
                    scheduled_date: Some(schedule_date),
                },
                message: "Proposed full scheduling for tomorrow.",
            };
        }

        let remainder = invoice.amount_cents - immediate;
        if remainder > 0 {
            return PlanProposal {
                plan: PaymentPlan {
                    total_cents: invoice.amount_cents,
                    currency: invoice.currency.clone(),
                    immediate_cents: immediate,
                    scheduled_cents: remainder,
                    scheduled_date: Some(schedule_date),
                },
                message: "Proposed split: partial now, remainder tomorrow.",
            };
        }

        PlanProposal {
            plan: PaymentPlan {
                total_cents: invoice.amount_cents,
                currency: invoice.currency.clone(),
                immediate_cents: invoice.amount_cents,
                scheduled_cents: 0,
                scheduled_date: None,
            },
            message: "Proposed full payment now.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(amount_cents: i64) -> Invoice {
        Invoice {
            invoice_id: "INV-1".to_string(),
            vendor_id: "ACME_CO".to_string(),
            amount_cents,
            currency: "USD".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            memo: String::new(),
        }
    }

    fn schedule_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
    }

    #[test]
    fn test_propose_full_payment_now() {
        let acct = Account::new("A", 50000, 50000);
        let proposal = PaymentPlan::propose(&invoice(25000), &acct, schedule_date());
        assert_eq!(proposal.plan.immediate_cents, 25000);
        assert_eq!(proposal.plan.scheduled_cents, 0);
        assert_eq!(proposal.plan.scheduled_date, None);
        assert_eq!(proposal.message, "Proposed full payment now.");
    }

    #[test]
    fn test_propose_split_when_balance_short() {
        // 余额 180.00 < 发票 250.00：立即 180.00，剩余 70.00 排期
        let acct = Account::new("A", 18000, 50000);
        let proposal = PaymentPlan::propose(&invoice(25000), &acct, schedule_date());
        assert_eq!(proposal.plan.immediate_cents, 18000);
        assert_eq!(proposal.plan.scheduled_cents, 7000);
        assert_eq!(proposal.plan.scheduled_date, Some(schedule_date()));
        assert_eq!(proposal.message, "Proposed split: partial now, remainder tomorrow.");
    }

    #[test]
    fn test_propose_clamped_by_remaining_daily_limit() {
        let mut acct = Account::new("A", 50000, 20000);
        acct.spent_today_cents = 15000;
        let proposal = PaymentPlan::propose(&invoice(25000), &acct, schedule_date());
        assert_eq!(proposal.plan.immediate_cents, 5000);
        assert_eq!(proposal.plan.scheduled_cents, 20000);
    }

    #[test]
    fn test_propose_full_scheduling_when_no_headroom() {
        let acct = Account::new("A", 0, 50000);
        let proposal = PaymentPlan::propose(&invoice(25000), &acct, schedule_date());
        assert_eq!(proposal.plan.immediate_cents, 0);
        assert_eq!(proposal.plan.scheduled_cents, 25000);
        assert_eq!(proposal.plan.scheduled_date, Some(schedule_date()));
        assert_eq!(proposal.message, "Proposed full scheduling for tomorrow.");
    }

    #[test]
    fn test_propose_full_scheduling_when_limit_exhausted() {
        let mut acct = Account::new("A", 50000, 10000);
        acct.spent_today_cents = 10000;
        let proposal = PaymentPlan::propose(&invoice(25000), &acct, schedule_date());
        assert_eq!(proposal.plan.immediate_cents, 0);
        assert_eq!(proposal.plan.scheduled_cents, 25000);
    }
}
