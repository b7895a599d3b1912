//! 领域模型：发票、账户、支付计划与支付策略
//!
//! 金额统一以「分」为单位的 i64 存储，展示时再转为两位小数字符串，避免浮点误差。

pub mod account;
pub mod invoice;
pub mod plan;
pub mod policy;

pub use account::Account;
pub use invoice::Invoice;
pub use plan::{PaymentPlan, PlanProposal};
pub use policy::PaymentPolicy;

/// 将分转为 "123.45" 形式的金额字符串（仅用于展示与审计日志）
pub fn cents_to_display(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}
