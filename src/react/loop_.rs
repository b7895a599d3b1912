//! Episode 主循环
//!
//! Thought (Reasoner) -> Act (Tool) -> Observe -> 更新记忆 -> 下一轮 Thought；
//! 支持取消令牌、最大步数限制与超时重试。可选 event_tx：向外部推送
//! Thought / ToolCall / Observation / Executed / Scheduled / Rejected / Done。
//!
//! 检查不通过（发票无效、合规拒绝）以 Rejected 结果结束 Episode，不是错误；
//! AgentError 只在基础设施失败（超时、解析、取消、步数超限）时返回。

use serde::de::DeserializeOwned;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::core::{AgentError, RecoveryAction, RecoveryEngine};
use crate::domain::cents_to_display;
use crate::memory::EpisodeMemory;
use crate::react::{Action, EpisodeEvent, Reasoner};
use crate::tools::{CheckOutcome, ExecuteOutcome, PlanOutcome, ScheduleOutcome, ToolExecutor};

/// 单次 Episode 最大 ReAct 步数，防止死循环
const MAX_EPISODE_STEPS: usize = 20;
/// Observation 预览最大字符数
const OBSERVATION_PREVIEW_CHARS: usize = 200;

/// Episode 的业务结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeOutcome {
    /// 全部动作完成（含可能的排期）
    Completed,
    /// 某项检查不通过，附拒绝原因
    Rejected(String),
}

/// Episode 执行报告：结果、步数与完整审计轨迹
#[derive(Debug)]
pub struct EpisodeReport {
    pub outcome: EpisodeOutcome,
    pub steps: usize,
    pub transcript: String,
}

/// Episode 会话配置（builder 风格组装可选项）
pub struct EpisodeSession<'a> {
    /// 确定性 Reasoner（必需）
    pub reasoner: &'a Reasoner,
    /// 工具执行器（必需）
    pub executor: &'a ToolExecutor,
    /// 恢复引擎（必需）
    pub recovery: &'a RecoveryEngine,
    /// 取消令牌（必需）
    pub cancel_token: CancellationToken,
    /// 可选：事件推送通道
    pub event_tx: Option<&'a UnboundedSender<EpisodeEvent>>,
    /// 最大步数（默认 MAX_EPISODE_STEPS）
    pub max_steps: usize,
}

impl<'a> EpisodeSession<'a> {
    /// 创建最小配置的 EpisodeSession
    pub fn new(
        reasoner: &'a Reasoner,
        executor: &'a ToolExecutor,
        recovery: &'a RecoveryEngine,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            reasoner,
            executor,
            recovery,
            cancel_token,
            event_tx: None,
            max_steps: MAX_EPISODE_STEPS,
        }
    }

    /// 设置事件推送通道
    pub fn with_event_tx(mut self, tx: &'a UnboundedSender<EpisodeEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// 设置最大步数
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

fn send_event(tx: &Option<&UnboundedSender<EpisodeEvent>>, ev: EpisodeEvent) {
    if let Some(t) = tx {
        let _ = t.send(ev);
    }
}

fn preview(s: &str) -> String {
    if s.len() > OBSERVATION_PREVIEW_CHARS {
        format!(
            "{}...",
            s.chars().take(OBSERVATION_PREVIEW_CHARS).collect::<String>()
        )
    } else {
        s.to_string()
    }
}

fn parse_observation<T: DeserializeOwned>(tool: &str, obs: &str) -> Result<T, AgentError> {
    serde_json::from_str(obs)
        .map_err(|e| AgentError::ObservationParseError(format!("{tool}: {e}: {obs}")))
}

/// 构建工具参数与审计日志中的调用描述
fn prepare_call(
    mem: &EpisodeMemory,
    action: Action,
) -> Result<(serde_json::Value, String), AgentError> {
    match action {
        Action::ValidateInvoice => {
            let args = serde_json::to_value(&mem.invoice)
                .map_err(|e| AgentError::ToolExecutionFailed(e.to_string()))?;
            Ok((args, "validate_invoice()".to_string()))
        }
        Action::RunKyc => Ok((
            serde_json::json!({ "vendor_id": mem.invoice.vendor_id }),
            format!("run_kyc({})", mem.invoice.vendor_id),
        )),
        Action::RunAml => Ok((
            serde_json::json!({ "vendor_id": mem.invoice.vendor_id }),
            format!("run_aml({})", mem.invoice.vendor_id),
        )),
        Action::CheckBalance => Ok((
            serde_json::json!({ "amount_cents": mem.invoice.amount_cents }),
            format!(
                "check_balance({} {})",
                cents_to_display(mem.invoice.amount_cents),
                mem.invoice.currency
            ),
        )),
        Action::CheckDailyLimit => Ok((
            serde_json::json!({ "amount_cents": mem.invoice.amount_cents }),
            format!(
                "check_daily_limit({} {})",
                cents_to_display(mem.invoice.amount_cents),
                mem.invoice.currency
            ),
        )),
        Action::ProposePlan => {
            let args = serde_json::to_value(&mem.invoice)
                .map_err(|e| AgentError::ToolExecutionFailed(e.to_string()))?;
            Ok((args, "propose_plan()".to_string()))
        }
        Action::ExecuteImmediate => {
            let plan = mem.payment_plan.as_ref().ok_or_else(|| {
                AgentError::ToolExecutionFailed("payment plan missing".to_string())
            })?;
            Ok((
                serde_json::json!({
                    "amount_cents": plan.immediate_cents,
                    "currency": plan.currency,
                }),
                format!(
                    "execute_payment({} {})",
                    cents_to_display(plan.immediate_cents),
                    plan.currency
                ),
            ))
        }
        Action::ScheduleRemainder => {
            let plan = mem.payment_plan.as_ref().ok_or_else(|| {
                AgentError::ToolExecutionFailed("payment plan missing".to_string())
            })?;
            let date = plan.scheduled_date.ok_or_else(|| {
                AgentError::ToolExecutionFailed("scheduled date missing in plan".to_string())
            })?;
            Ok((
                serde_json::json!({
                    "amount_cents": plan.scheduled_cents,
                    "currency": plan.currency,
                    "date": date,
                }),
                format!(
                    "schedule_payment({} {} on {})",
                    cents_to_display(plan.scheduled_cents),
                    plan.currency,
                    date
                ),
            ))
        }
    }
}

/// 执行一次支付 Episode
///
/// Reasoner 决策 -> 工具调用（超时重试一次）-> 解析观察并更新记忆；
/// 检查不通过返回 Rejected，全部完成返回 Completed。
pub async fn run_episode(
    session: &EpisodeSession<'_>,
    mem: &mut EpisodeMemory,
) -> Result<EpisodeReport, AgentError> {
    let reasoner = session.reasoner;
    let executor = session.executor;
    let recovery = session.recovery;
    let event_tx = session.event_tx;

    let mut step = 0;

    let outcome = loop {
        step += 1;

        if session.cancel_token.is_cancelled() {
            send_event(&event_tx, EpisodeEvent::Error {
                text: "Cancelled by user".to_string(),
            });
            return Err(AgentError::Cancelled);
        }

        if step > session.max_steps {
            let err = AgentError::StepLimitExceeded(session.max_steps);
            send_event(&event_tx, EpisodeEvent::Error { text: err.to_string() });
            return Err(err);
        }

        send_event(&event_tx, EpisodeEvent::StepUpdate {
            step,
            max_steps: session.max_steps,
        });

        let Some(action) = reasoner.next_action(mem) else {
            mem.audit.log(format!("Thought {step}: Done."));
            send_event(&event_tx, EpisodeEvent::Done);
            break EpisodeOutcome::Completed;
        };

        mem.audit
            .log(format!("Thought {step}: Deciding to '{}'.", action.label()));
        send_event(&event_tx, EpisodeEvent::Thought {
            action: action.label().to_string(),
        });

        let tool = action.tool_name();
        if !executor.has_tool(tool) {
            let err = AgentError::UnknownAction(tool.to_string());
            if let RecoveryAction::AskUser(detail) = recovery.handle(&err) {
                send_event(&event_tx, EpisodeEvent::Recovery {
                    action: "AskUser".to_string(),
                    detail,
                });
            }
            send_event(&event_tx, EpisodeEvent::Error { text: err.to_string() });
            return Err(err);
        }

        let (args, call_display) = prepare_call(mem, action)?;
        mem.audit.log(format!("Action {step}: {call_display}"));
        send_event(&event_tx, EpisodeEvent::ToolCall {
            tool: tool.to_string(),
            args: args.clone(),
        });

        let observation = match executor.execute(tool, args.clone()).await {
            Ok(o) => o,
            Err(e) => {
                send_event(&event_tx, EpisodeEvent::ToolFailure {
                    tool: tool.to_string(),
                    reason: e.to_string(),
                });
                match recovery.handle(&e) {
                    RecoveryAction::RetryTool => {
                        send_event(&event_tx, EpisodeEvent::Recovery {
                            action: "RetryTool".to_string(),
                            detail: format!("Retrying {tool} once after timeout"),
                        });
                        match executor.execute(tool, args).await {
                            Ok(o) => o,
                            Err(e2) => {
                                send_event(&event_tx, EpisodeEvent::Error {
                                    text: e2.to_string(),
                                });
                                return Err(e2);
                            }
                        }
                    }
                    RecoveryAction::AskUser(detail) => {
                        send_event(&event_tx, EpisodeEvent::Recovery {
                            action: "AskUser".to_string(),
                            detail,
                        });
                        send_event(&event_tx, EpisodeEvent::Error { text: e.to_string() });
                        return Err(e);
                    }
                    RecoveryAction::Abort => {
                        send_event(&event_tx, EpisodeEvent::Recovery {
                            action: "Abort".to_string(),
                            detail: e.to_string(),
                        });
                        send_event(&event_tx, EpisodeEvent::Error { text: e.to_string() });
                        return Err(e);
                    }
                }
            }
        };

        send_event(&event_tx, EpisodeEvent::Observation {
            tool: tool.to_string(),
            preview: preview(&observation),
        });

        match action {
            Action::ValidateInvoice => {
                let check: CheckOutcome = parse_observation(tool, &observation)?;
                mem.audit.log(format!("Observation {step}: {}", check.msg));
                mem.invoice_valid = Some(check.ok);
                if !check.ok {
                    mem.record_failure(check.msg.clone());
                    send_event(&event_tx, EpisodeEvent::Rejected {
                        reason: check.msg.clone(),
                    });
                    break EpisodeOutcome::Rejected(check.msg);
                }
            }
            Action::RunKyc => {
                let check: CheckOutcome = parse_observation(tool, &observation)?;
                mem.audit.log(format!("Observation {step}: {}", check.msg));
                mem.vendor_kyc_ok = Some(check.ok);
                if !check.ok {
                    mem.record_failure(check.msg.clone());
                    send_event(&event_tx, EpisodeEvent::Rejected {
                        reason: check.msg.clone(),
                    });
                    break EpisodeOutcome::Rejected(check.msg);
                }
            }
            Action::RunAml => {
                let check: CheckOutcome = parse_observation(tool, &observation)?;
                mem.audit.log(format!("Observation {step}: {}", check.msg));
                mem.vendor_aml_ok = Some(check.ok);
                if !check.ok {
                    mem.record_failure(check.msg.clone());
                    send_event(&event_tx, EpisodeEvent::Rejected {
                        reason: check.msg.clone(),
                    });
                    break EpisodeOutcome::Rejected(check.msg);
                }
            }
            // 余额/限额是参考检查：不足时记入 failures，由 propose_plan 拆分或排期
            Action::CheckBalance => {
                let check: CheckOutcome = parse_observation(tool, &observation)?;
                mem.audit.log(format!("Observation {step}: {}", check.msg));
                mem.balance_ok = Some(check.ok);
                if !check.ok {
                    mem.record_failure(check.msg);
                }
            }
            Action::CheckDailyLimit => {
                let check: CheckOutcome = parse_observation(tool, &observation)?;
                mem.audit.log(format!("Observation {step}: {}", check.msg));
                mem.limit_ok = Some(check.ok);
                if !check.ok {
                    mem.record_failure(check.msg);
                }
            }
            Action::ProposePlan => {
                let proposed: PlanOutcome = parse_observation(tool, &observation)?;
                mem.audit.log(format!("Observation {step}: {}", proposed.msg));
                mem.payment_plan = Some(proposed.plan);
            }
            Action::ExecuteImmediate => {
                let executed: ExecuteOutcome = parse_observation(tool, &observation)?;
                mem.audit.log(format!(
                    "Observation {step}: {} (txn={})",
                    executed.msg, executed.txn_id
                ));
                mem.executed_cents = executed.amount_cents;
                mem.txn_id = Some(executed.txn_id.clone());
                send_event(&event_tx, EpisodeEvent::Executed {
                    txn_id: executed.txn_id,
                    amount_cents: executed.amount_cents,
                });
            }
            Action::ScheduleRemainder => {
                let scheduled: ScheduleOutcome = parse_observation(tool, &observation)?;
                mem.audit.log(format!(
                    "Observation {step}: {} (id={})",
                    scheduled.msg, scheduled.schedule_id
                ));
                mem.scheduled = true;
                mem.schedule_id = Some(scheduled.schedule_id.clone());
                let date = mem
                    .payment_plan
                    .as_ref()
                    .and_then(|p| p.scheduled_date)
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                send_event(&event_tx, EpisodeEvent::Scheduled {
                    schedule_id: scheduled.schedule_id,
                    amount_cents: scheduled.amount_cents,
                    date,
                });
            }
        }
    };

    Ok(EpisodeReport {
        outcome,
        steps: step,
        transcript: mem.audit.render(),
    })
}
