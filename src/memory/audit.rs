//! 审计日志
//!
//! 每条记录带本地时间戳（秒级 ISO8601），追加时同步输出到 tracing；
//! 支持写入/加载 JSON 文件，便于跨进程留存支付轨迹。

use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// 单条审计记录
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: String,
    pub message: String,
}

/// 有序审计日志：append-only，渲染为 "ts | msg" 文本轨迹
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条记录，并以 info 级别输出到 tracing
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        tracing::info!(audit = %message, "episode");
        self.entries.push(AuditEntry { timestamp, message });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 是否存在包含指定子串的记录
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }

    /// 渲染为每行 "ts | msg" 的文本轨迹
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} | {}", e.timestamp, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 简单的文件持久化：单文件 JSON，每条记录含 timestamp + message
#[derive(Debug)]
pub struct AuditPersistence {
    path: std::path::PathBuf,
}

impl AuditPersistence {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 从 JSON 文件加载审计记录；文件不存在时返回空日志
    pub fn load(&self) -> anyhow::Result<AuditLog> {
        if !self.path.exists() {
            return Ok(AuditLog::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let entries: Vec<AuditEntry> = serde_json::from_str(&data)?;
        Ok(AuditLog { entries })
    }

    /// 将审计日志写入 JSON 文件；父目录不存在时自动创建
    pub fn save(&self, log: &AuditLog) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(log.entries())?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_appends_in_order() {
        let mut log = AuditLog::new();
        log.log("Thought 1: Deciding to 'validate_invoice'.");
        log.log("Action 1: validate_invoice()");
        assert_eq!(log.len(), 2);
        assert!(log.contains("validate_invoice"));
        let rendered = log.render();
        assert!(rendered.lines().next().unwrap().contains(" | Thought 1"));
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.json");
        let mut log = AuditLog::new();
        log.log("Observation 1: Invoice validated.");

        let store = AuditPersistence::new(&path);
        store.save(&log).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains("Invoice validated."));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AuditPersistence::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }
}
