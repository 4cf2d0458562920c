//! passbook-core: canonical transaction model, categorization, dedup and recurrence

pub mod dedup;
pub mod recurrence;
pub mod time;
pub mod transaction;

pub use dedup::{deduplicate, renumber, DedupKey};
pub use recurrence::mark_recurring;
pub use transaction::{round_cents, Direction, Recurrence, Transaction, TransactionWarning};

/// Keyword categorization of transaction descriptions
pub mod categorizer {
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// Category tags emitted by [`categorize`]
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
    pub enum Category {
        #[serde(rename = "Digital Payment")]
        DigitalPayment,
        #[serde(rename = "Cash Withdrawal")]
        CashWithdrawal,
        #[serde(rename = "Salary")]
        Salary,
        #[serde(rename = "Interest")]
        Interest,
        #[serde(rename = "Transfer")]
        Transfer,
        #[serde(rename = "Bank Charges")]
        BankCharges,
        #[serde(rename = "Others")]
        Others,
    }

    impl Category {
        pub fn label(&self) -> &'static str {
            match self {
                Category::DigitalPayment => "Digital Payment",
                Category::CashWithdrawal => "Cash Withdrawal",
                Category::Salary => "Salary",
                Category::Interest => "Interest",
                Category::Transfer => "Transfer",
                Category::BankCharges => "Bank Charges",
                Category::Others => "Others",
            }
        }
    }

    impl fmt::Display for Category {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.label())
        }
    }

    /// Keyword groups in tie-break order: earlier groups win.
    const RULES: &[(Category, &[&str])] = &[
        (Category::DigitalPayment, &["upi", "gpay", "paytm", "phonepe", "bhim"]),
        (Category::CashWithdrawal, &["atm", "cash withdrawal", "cwd"]),
        (Category::Salary, &["salary", "sal", "wages"]),
        (Category::Interest, &["interest", "int"]),
        (Category::Transfer, &["transfer", "tfr", "neft", "rtgs", "imps"]),
        (Category::BankCharges, &["fee", "charges", "charge"]),
    ];

    /// Categorize a description by substring match on the lowercased text.
    /// Total: anything unmatched is `Others`.
    pub fn categorize(description: &str) -> Category {
        let desc = description.to_lowercase();

        RULES
            .iter()
            .find(|(_, words)| words.iter().any(|w| desc.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Others)
    }

}

pub use categorizer::{categorize, Category};
