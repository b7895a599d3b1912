//! 错误恢复引擎
//!
//! 根据 AgentError 类型返回 RecoveryAction，供 Episode 循环决定是重试、询问用户还是终止。

use crate::core::{AgentError, RecoveryAction};

/// 语义化错误恢复：将错误映射为可执行动作（重试 / 问用户 / 终止）
#[derive(Debug, Default)]
pub struct RecoveryEngine;

impl RecoveryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 根据错误类型返回建议的恢复动作
    pub fn handle(&self, err: &AgentError) -> RecoveryAction {
        match err {
            AgentError::ToolTimeout(_) => RecoveryAction::RetryTool,
            AgentError::ToolExecutionFailed(msg) => {
                RecoveryAction::AskUser(format!("工具执行失败: {msg}"))
            }
            AgentError::UnknownAction(name) => RecoveryAction::AskUser(format!(
                "Reasoner 给出的动作 '{name}' 未注册为工具，请检查工具箱装配。"
            )),
            AgentError::ObservationParseError(_) => RecoveryAction::Abort,
            AgentError::StepLimitExceeded(_) => RecoveryAction::Abort,
            AgentError::Cancelled => RecoveryAction::Abort,
            AgentError::ConfigError(_) => RecoveryAction::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_tool_timeout_retries() {
        let engine = RecoveryEngine::new();
        let err = AgentError::ToolTimeout("run_kyc".to_string());
        assert!(matches!(engine.handle(&err), RecoveryAction::RetryTool));
    }

    #[test]
    fn test_recovery_tool_failure_asks_user() {
        let engine = RecoveryEngine::new();
        let err = AgentError::ToolExecutionFailed("insufficient funds".to_string());
        match engine.handle(&err) {
            RecoveryAction::AskUser(msg) => assert!(msg.contains("insufficient funds")),
            _ => panic!("Expected AskUser"),
        }
    }

    #[test]
    fn test_recovery_unknown_action_asks_user() {
        let engine = RecoveryEngine::new();
        let err = AgentError::UnknownAction("teleport_money".to_string());
        match engine.handle(&err) {
            RecoveryAction::AskUser(msg) => assert!(msg.contains("teleport_money")),
            _ => panic!("Expected AskUser"),
        }
    }

    #[test]
    fn test_recovery_cancelled_aborts() {
        let engine = RecoveryEngine::new();
        assert!(matches!(
            engine.handle(&AgentError::Cancelled),
            RecoveryAction::Abort
        ));
    }

    #[test]
    fn test_recovery_step_limit_aborts() {
        let engine = RecoveryEngine::new();
        assert!(matches!(
            engine.handle(&AgentError::StepLimitExceeded(20)),
            RecoveryAction::Abort
        ));
    }
}
