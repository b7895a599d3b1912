//! Episode 记忆与审计
//!
//! EpisodeMemory 承载单次支付 Episode 的全部状态（Reasoner 的决策依据），
//! AuditLog 记录带时间戳的 Thought / Action / Observation 全程轨迹。

pub mod audit;
pub mod episode;

pub use audit::{AuditEntry, AuditLog, AuditPersistence};
pub use episode::EpisodeMemory;
