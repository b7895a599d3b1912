//! 工具观察结果的 JSON 形状
//!
//! 检查类工具在 Ok 观察中携带 {ok, msg}（检查不通过不是执行失败）；
//! 执行/排期/计划类工具携带各自的引用信息。循环端用 serde 反序列化消费。

use serde::{Deserialize, Serialize};

use crate::domain::PaymentPlan;

/// 检查类工具的观察：ok 表示检查是否通过
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub ok: bool,
    pub msg: String,
}

impl CheckOutcome {
    pub fn pass(msg: impl Into<String>) -> Self {
        Self {
            ok: true,
            msg: msg.into(),
        }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            msg: msg.into(),
        }
    }

    /// 序列化为观察字符串（Tool::execute 的 Ok 值）
    pub fn into_observation(self) -> Result<String, String> {
        serde_json::to_string(&self).map_err(|e| e.to_string())
    }
}

/// execute_payment 成功时的观察
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExecuteOutcome {
    pub msg: String,
    pub txn_id: String,
    pub amount_cents: i64,
}

/// schedule_payment 成功时的观察
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub msg: String,
    pub schedule_id: String,
    pub amount_cents: i64,
}

/// propose_plan 的观察：说明 + 计划本体
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub msg: String,
    pub plan: PaymentPlan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_outcome_observation_round_trip() {
        let obs = CheckOutcome::fail("KYC failed.").into_observation().unwrap();
        let parsed: CheckOutcome = serde_json::from_str(&obs).unwrap();
        assert!(!parsed.ok);
        assert_eq!(parsed.msg, "KYC failed.");
    }
}
