//! Paybee - Rust 确定性金融智能体
//!
//! 入口：初始化日志与配置，装配工具箱与 Reasoner，对一张发票执行支付 Episode，
//! 结束后打印完整审计轨迹并落盘。发票可由第一个命令行参数指定 JSON 文件，
//! 缺省时使用内置演示数据（ACME_CO 250.00 USD，账户余额 180.00）。

use std::sync::{Arc, Mutex};

use anyhow::Context;
use chrono::{Duration, Local};
use tokio_util::sync::CancellationToken;

use paybee::config::load_config;
use paybee::core::RecoveryEngine;
use paybee::domain::{cents_to_display, Account, Invoice, PaymentPolicy};
use paybee::memory::{AuditPersistence, EpisodeMemory};
use paybee::react::{run_episode, EpisodeOutcome, EpisodeSession, Reasoner};
use paybee::tools::{build_registry, ToolExecutor};

/// 演示发票：INV-1001，ACME_CO，250.00 USD，5 天后到期
fn demo_invoice() -> Invoice {
    Invoice {
        invoice_id: "INV-1001".to_string(),
        vendor_id: "ACME_CO".to_string(),
        amount_cents: 250_00,
        currency: "USD".to_string(),
        due_date: Local::now().date_naive() + Duration::days(5),
        memo: "Monthly hosting fee".to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    paybee::observability::init();

    let cfg = load_config(None).context("Failed to load config")?;

    let invoice = match std::env::args().nth(1) {
        Some(path) => {
            let data = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read invoice file {path}"))?;
            serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse invoice file {path}"))?
        }
        None => demo_invoice(),
    };

    // 演示账户：余额 180.00，单日限额 500.00
    let account = Arc::new(Mutex::new(Account::new("OPERATING-USD", 180_00, 500_00)));

    let policy = PaymentPolicy::from_config(&cfg.payment);
    let registry = build_registry(&policy, &cfg.compliance, account.clone());
    let mut toolbox = registry.tool_descriptions();
    toolbox.sort();
    for (name, desc) in &toolbox {
        tracing::debug!(tool = %name, "{desc}");
    }
    let executor = ToolExecutor::new(registry, cfg.tools.tool_timeout_secs);
    let reasoner = Reasoner::new();
    let recovery = RecoveryEngine::new();

    let session = EpisodeSession::new(&reasoner, &executor, &recovery, CancellationToken::new())
        .with_max_steps(cfg.app.max_steps);
    let mut mem = EpisodeMemory::new(invoice, account);

    let report = run_episode(&session, &mut mem)
        .await
        .context("Episode failed")?;

    println!("\n=== FINAL AUDIT LOG ===");
    println!("{}", report.transcript);
    match &report.outcome {
        EpisodeOutcome::Completed => println!("\nEpisode completed in {} steps.", report.steps),
        EpisodeOutcome::Rejected(reason) => {
            println!("\nEpisode rejected after {} steps: {}", report.steps, reason)
        }
    }

    let acct = mem.account_snapshot();
    println!(
        "Account {}: balance {}, spent today {}",
        acct.account_id,
        cents_to_display(acct.balance_cents),
        cents_to_display(acct.spent_today_cents)
    );

    AuditPersistence::new("memory/audit.json")
        .save(&mem.audit)
        .context("Failed to persist audit log")?;

    Ok(())
}
