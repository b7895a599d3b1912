//! 发票

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 待支付的供应商发票；currency 为字符串，由 validate_invoice 工具按配置白名单校验
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub vendor_id: String,
    /// 金额（分）
    pub amount_cents: i64,
    pub currency: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub memo: String,
}
