//! 金融工具箱
//!
//! 所有工具实现 Tool trait，经 ToolRegistry 注册、ToolExecutor 调用（带超时与审计）。
//! build_registry 按配置装配完整工具箱：校验、合规、资金检查、计划、支付与排期。

pub mod compliance;
pub mod executor;
pub mod funds;
pub mod outcome;
pub mod payment;
pub mod plan;
pub mod registry;
pub mod validate;

use std::sync::{Arc, Mutex};

pub use compliance::{AmlTool, KycTool};
pub use executor::ToolExecutor;
pub use funds::{CheckBalanceTool, CheckDailyLimitTool};
pub use outcome::{CheckOutcome, ExecuteOutcome, PlanOutcome, ScheduleOutcome};
pub use payment::{ExecutePaymentTool, SchedulePaymentTool};
pub use plan::ProposePlanTool;
pub use registry::{Tool, ToolRegistry};
pub use validate::ValidateInvoiceTool;

use crate::config::ComplianceSection;
use crate::domain::{Account, PaymentPolicy};

/// 装配完整工具箱：账户类工具共享同一个账户句柄
pub fn build_registry(
    policy: &PaymentPolicy,
    compliance: &ComplianceSection,
    account: Arc<Mutex<Account>>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(ValidateInvoiceTool::new(policy.clone()));
    registry.register(KycTool::new(compliance.kyc_flag_suffix.clone()));
    registry.register(AmlTool::new(compliance.aml_denylist.clone()));
    registry.register(CheckBalanceTool::new(account.clone()));
    registry.register(CheckDailyLimitTool::new(account.clone()));
    registry.register(ProposePlanTool::new(policy.clone(), account.clone()));
    registry.register(ExecutePaymentTool::new(account.clone()));
    registry.register(SchedulePaymentTool::new());
    registry
}
