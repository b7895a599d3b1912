//! 合规工具：KYC 与 AML 筛查
//!
//! 沙箱规则：vendor_id 以配置后缀结尾则 KYC 不通过；vendor_id 在拒付名单内则 AML 标记。
//! 生产部署时这两个工具替换为对接真实合规服务的实现即可，观察契约不变。

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::{CheckOutcome, Tool};

fn vendor_id_from(args: &Value) -> Result<String, String> {
    args.get("vendor_id")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| "Invalid args: missing vendor_id".to_string())
}

/// run_kyc：供应商身份核验
pub struct KycTool {
    flag_suffix: String,
}

impl KycTool {
    pub fn new(flag_suffix: impl Into<String>) -> Self {
        Self {
            flag_suffix: flag_suffix.into(),
        }
    }
}

#[async_trait]
impl Tool for KycTool {
    fn name(&self) -> &str {
        "run_kyc"
    }

    fn description(&self) -> &str {
        "Run KYC for a vendor. Args: {\"vendor_id\": \"...\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": { "vendor_id": { "type": "string" } },
            "required": ["vendor_id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let vendor_id = vendor_id_from(&args)?;
        if vendor_id.ends_with(&self.flag_suffix) {
            CheckOutcome::fail("KYC failed.").into_observation()
        } else {
            CheckOutcome::pass("KYC passed.").into_observation()
        }
    }
}

/// run_aml：反洗钱筛查（拒付名单全匹配）
pub struct AmlTool {
    denylist: Vec<String>,
}

impl AmlTool {
    pub fn new(denylist: Vec<String>) -> Self {
        Self { denylist }
    }
}

#[async_trait]
impl Tool for AmlTool {
    fn name(&self) -> &str {
        "run_aml"
    }

    fn description(&self) -> &str {
        "Run AML screening for a vendor. Args: {\"vendor_id\": \"...\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": { "vendor_id": { "type": "string" } },
            "required": ["vendor_id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let vendor_id = vendor_id_from(&args)?;
        if self.denylist.iter().any(|v| v == &vendor_id) {
            CheckOutcome::fail("AML screening flagged vendor.").into_observation()
        } else {
            CheckOutcome::pass("AML screening passed.").into_observation()
        }
    }
}
