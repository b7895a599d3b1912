//! Agent 错误类型与恢复动作
//!
//! 与 RecoveryEngine 配合：AgentError 只覆盖基础设施类失败（超时、解析、取消、步数超限），
//! 业务性拒绝（发票无效、合规不通过）由 Episode 的 Rejected 结果表达，不走错误通道。

use thiserror::Error;

/// Episode 运行过程中可能出现的错误（工具、解析、取消、步数超限等）
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Tool execution failed: {0}")]
    ToolExecutionFailed(String),

    #[error("Tool timeout: {0}")]
    ToolTimeout(String),

    /// Reasoner 给出的动作在工具箱中不存在（注册缺失）
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// 工具观察结果不是预期的 JSON 形状
    #[error("Observation parse error: {0}")]
    ObservationParseError(String),

    #[error("Step limit exceeded: {0}")]
    StepLimitExceeded(usize),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Cancelled")]
    Cancelled,
}

/// 恢复引擎根据错误类型给出的建议动作
#[derive(Debug, Clone)]
pub enum RecoveryAction {
    /// 重试同一工具一次（如超时）
    RetryTool,
    /// 需要用户决策（如工具执行失败）
    AskUser(String),
    /// 终止当前 Episode
    Abort,
}
