//! 确定性 Reasoner（Thought）
//!
//! 代替 LLM 规划器的规则级联：只读 EpisodeMemory，按固定顺序给出下一个动作，
//! 全部检查与执行完成后返回 None。同一份记忆输入必然得到同一个决策。

use crate::memory::EpisodeMemory;

/// Reasoner 可做出的动作；每个动作映射到一个已注册工具
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ValidateInvoice,
    RunKyc,
    RunAml,
    CheckBalance,
    CheckDailyLimit,
    ProposePlan,
    ExecuteImmediate,
    ScheduleRemainder,
}

impl Action {
    /// Thought 审计行中的决策名
    pub fn label(&self) -> &'static str {
        match self {
            Action::ValidateInvoice => "validate_invoice",
            Action::RunKyc => "run_kyc",
            Action::RunAml => "run_aml",
            Action::CheckBalance => "check_balance",
            Action::CheckDailyLimit => "check_daily_limit",
            Action::ProposePlan => "propose_plan",
            Action::ExecuteImmediate => "execute_immediate",
            Action::ScheduleRemainder => "schedule_remainder",
        }
    }

    /// 分发到的工具名（execute_immediate / schedule_remainder 与工具名不同）
    pub fn tool_name(&self) -> &'static str {
        match self {
            Action::ExecuteImmediate => "execute_payment",
            Action::ScheduleRemainder => "schedule_payment",
            other => other.label(),
        }
    }
}

/// 规则级联：校验 → KYC → AML → 余额/限额参考检查 → 计划 → 立即支付 → 排期剩余 → 完成
#[derive(Debug, Default)]
pub struct Reasoner;

impl Reasoner {
    pub fn new() -> Self {
        Self
    }

    /// 根据记忆状态决定下一个动作；None 表示 Episode 完成
    pub fn next_action(&self, mem: &EpisodeMemory) -> Option<Action> {
        if mem.invoice_valid.is_none() {
            return Some(Action::ValidateInvoice);
        }
        if mem.vendor_kyc_ok.is_none() {
            return Some(Action::RunKyc);
        }
        if mem.vendor_aml_ok.is_none() {
            return Some(Action::RunAml);
        }
        if mem.balance_ok.is_none() {
            return Some(Action::CheckBalance);
        }
        if mem.limit_ok.is_none() {
            return Some(Action::CheckDailyLimit);
        }
        let Some(plan) = mem.payment_plan.as_ref() else {
            return Some(Action::ProposePlan);
        };
        if mem.executed_cents < plan.immediate_cents {
            return Some(Action::ExecuteImmediate);
        }
        if !mem.scheduled && plan.scheduled_cents > 0 {
            return Some(Action::ScheduleRemainder);
        }
        None
    }
}
