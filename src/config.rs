//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `PAYBEE__*` 覆盖（双下划线表示嵌套，
//! 如 `PAYBEE__COMPLIANCE__KYC_FLAG_SUFFIX=Z`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub payment: PaymentSection,
    #[serde(default)]
    pub compliance: ComplianceSection,
    #[serde(default)]
    pub tools: ToolsSection,
}

/// [app] 段：应用名、Episode 步数上限
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: Option<String>,
    /// 单次 Episode 最大 ReAct 步数，防止死循环
    pub max_steps: usize,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: None,
            max_steps: 20,
        }
    }
}

/// [payment] 段：支持的币种白名单、发票最大账龄、排期延迟天数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentSection {
    pub supported_currencies: Vec<String>,
    /// 发票 due_date 早于今天超过此天数则拒绝
    pub max_invoice_age_days: i64,
    /// 无法立即支付的部分排期到今天 + N 天
    pub schedule_delay_days: i64,
}

impl Default for PaymentSection {
    fn default() -> Self {
        Self {
            supported_currencies: vec!["USD".into(), "EUR".into(), "GBP".into()],
            max_invoice_age_days: 30,
            schedule_delay_days: 1,
        }
    }
}

/// [compliance] 段：KYC 标记后缀与 AML 拒付名单
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComplianceSection {
    /// vendor_id 以此后缀结尾则 KYC 不通过（沙箱合规规则）
    pub kyc_flag_suffix: String,
    /// AML 筛查拒付名单（vendor_id 全匹配）
    pub aml_denylist: Vec<String>,
}

impl Default for ComplianceSection {
    fn default() -> Self {
        Self {
            kyc_flag_suffix: "X".to_string(),
            aml_denylist: vec!["OFAC123".into(), "AML999".into()],
        }
    }
}

/// [tools] 段：单次工具调用超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    /// 单次工具调用超时（秒）
    pub tool_timeout_secs: u64,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            tool_timeout_secs: 30,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSection::default(),
            payment: PaymentSection::default(),
            compliance: ComplianceSection::default(),
            tools: ToolsSection::default(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 PAYBEE__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 PAYBEE__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(
                config::File::with_name(name).required(false),
            );
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("PAYBEE")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_sandbox_rules() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.app.max_steps, 20);
        assert_eq!(cfg.payment.supported_currencies, vec!["USD", "EUR", "GBP"]);
        assert_eq!(cfg.payment.max_invoice_age_days, 30);
        assert_eq!(cfg.payment.schedule_delay_days, 1);
        assert_eq!(cfg.compliance.kyc_flag_suffix, "X");
        assert!(cfg.compliance.aml_denylist.contains(&"OFAC123".to_string()));
        assert_eq!(cfg.tools.tool_timeout_secs, 30);
    }
}
