//! Dashboard cards

use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};

use crate::money::format_minor;

/// A summary card on the member dashboard. Each kind carries only its own data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardCard {
    /// E-wallet balance
    Wallet {
        /// Balance in minor units
        balance: u64,
    },

    /// Commission earned
    Commission {
        /// Total earned in minor units
        total_amount: u64,

        /// Number of commission transactions
        transactions: u32,
    },

    /// Accumulated point value
    PointValue {
        /// Points
        points: u64,
    },

    /// Direct referrals
    Referrals {
        /// Number of referred members
        count: u32,
    },
}

impl DashboardCard {
    /// Card title.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Wallet { .. } => "E-Wallet",
            Self::Commission { .. } => "Commission",
            Self::PointValue { .. } => "Point Value",
            Self::Referrals { .. } => "Referrals",
        }
    }

    /// The card's main figure, formatted for display.
    pub fn headline(&self, currency: &'static Currency) -> String {
        match self {
            Self::Wallet { balance } => format_minor(*balance, currency),
            Self::Commission {
                total_amount,
                transactions,
            } => {
                let plural = if *transactions == 1 { "" } else { "s" };

                format!(
                    "{} ({transactions} transaction{plural})",
                    format_minor(*total_amount, currency)
                )
            }
            Self::PointValue { points } => format!("{points} PV"),
            Self::Referrals { count } => count.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn headlines_format_by_kind() {
        assert_eq!(
            DashboardCard::Wallet { balance: 999 }.headline(iso::USD),
            "$9.99"
        );
        assert_eq!(
            DashboardCard::Commission {
                total_amount: 1250,
                transactions: 1,
            }
            .headline(iso::GBP),
            "£12.50 (1 transaction)"
        );
        assert_eq!(
            DashboardCard::PointValue { points: 40 }.headline(iso::USD),
            "40 PV"
        );
        assert_eq!(DashboardCard::Referrals { count: 7 }.title(), "Referrals");
    }

    #[test]
    fn cards_are_tagged_by_kind() -> TestResult {
        let card: DashboardCard =
            serde_json::from_str(r#"{"type":"point_value","points":120}"#)?;

        assert_eq!(card, DashboardCard::PointValue { points: 120 });
        assert_eq!(
            serde_json::to_string(&DashboardCard::Referrals { count: 3 })?,
            r#"{"type":"referrals","count":3}"#
        );

        Ok(())
    }
}
