//! 支付策略：由配置派生的校验与排期参数

use chrono::{Duration, NaiveDate};

use crate::config::PaymentSection;

/// 支付策略：币种白名单、发票最大账龄、排期延迟
#[derive(Clone, Debug)]
pub struct PaymentPolicy {
    pub supported_currencies: Vec<String>,
    pub max_invoice_age_days: i64,
    pub schedule_delay_days: i64,
}

impl PaymentPolicy {
    pub fn from_config(section: &PaymentSection) -> Self {
        Self {
            supported_currencies: section.supported_currencies.clone(),
            max_invoice_age_days: section.max_invoice_age_days,
            schedule_delay_days: section.schedule_delay_days,
        }
    }

    pub fn supports_currency(&self, currency: &str) -> bool {
        self.supported_currencies.iter().any(|c| c == currency)
    }

    /// 发票可接受的最早 due_date（today - max_invoice_age_days）
    pub fn oldest_acceptable_due_date(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.max_invoice_age_days)
    }

    /// 排期日期（today + schedule_delay_days）
    pub fn schedule_date(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.schedule_delay_days)
    }
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        Self::from_config(&PaymentSection::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_currencies() {
        let policy = PaymentPolicy::default();
        assert!(policy.supports_currency("USD"));
        assert!(policy.supports_currency("EUR"));
        assert!(policy.supports_currency("GBP"));
        assert!(!policy.supports_currency("JPY"));
    }

    #[test]
    fn test_policy_dates() {
        let policy = PaymentPolicy::default();
        let today = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(
            policy.oldest_acceptable_due_date(today),
            NaiveDate::from_ymd_opt(2026, 7, 26).unwrap()
        );
        assert_eq!(
            policy.schedule_date(today),
            NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
        );
    }
}
