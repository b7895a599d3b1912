//! Episode 过程事件：用于外部订阅思考、工具调用、观察与结果

use serde::Serialize;

/// 单步过程事件（可序列化为 JSON 供前端/日志管道消费）
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EpisodeEvent {
    /// 步数更新（当前第几步）
    StepUpdate { step: usize, max_steps: usize },
    /// Reasoner 做出决策
    Thought { action: String },
    /// 调用工具
    ToolCall {
        tool: String,
        args: serde_json::Value,
    },
    /// 工具返回（预览，避免过长）
    Observation { tool: String, preview: String },
    /// 工具执行失败
    ToolFailure { tool: String, reason: String },
    /// 错误恢复动作（RetryTool / AskUser / Abort）
    Recovery { action: String, detail: String },
    /// 立即支付完成
    Executed { txn_id: String, amount_cents: i64 },
    /// 剩余金额已排期
    Scheduled {
        schedule_id: String,
        amount_cents: i64,
        date: String,
    },
    /// 检查不通过，Episode 被拒绝
    Rejected { reason: String },
    /// Episode 正常完成
    Done,
    /// 错误
    Error { text: String },
}
