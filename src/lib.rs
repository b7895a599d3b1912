//! Paybee - Rust 确定性金融智能体
//!
//! ReAct（Reason + Act）循环，但推理步不依赖 LLM：Reasoner 是一组确定性规则，
//! 根据 EpisodeMemory 的状态决定下一个动作（校验发票 / KYC / AML / 余额与限额检查 /
//! 生成支付计划 / 立即支付 / 排期剩余）。
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型与恢复引擎
//! - **domain**: 发票、账户、支付计划与支付策略
//! - **memory**: 单次 Episode 的状态记忆与审计日志
//! - **react**: 确定性 Reasoner、过程事件、Episode 主循环
//! - **tools**: 金融工具箱（validate_invoice、run_kyc、run_aml、check_balance、
//!   check_daily_limit、propose_plan、execute_payment、schedule_payment）与执行器
//! - **observability**: tracing 初始化

pub mod config;
pub mod core;
pub mod domain;
pub mod memory;
pub mod observability;
pub mod react;
pub mod tools;
