//! Dashboard view model: groups, recent expenses and balances.
//!
//! SYSTEM CONTEXT
//! ==============
//! There is no expenses backend yet; the dashboard renders fixed sample data
//! so the authenticated shell has something to show. Amounts are integer
//! cents to keep summary arithmetic exact.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

/// An expense-sharing group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: u32,
    pub name: &'static str,
    pub members: u32,
    pub total_cents: i64,
    /// CSS modifier for the group badge.
    pub accent: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: u32,
    pub description: &'static str,
    pub amount_cents: i64,
    /// Who paid; `"You"` for the signed-in user.
    pub payer: &'static str,
    pub when: &'static str,
    pub group: &'static str,
}

impl Expense {
    pub fn paid_by_you(&self) -> bool {
        self.payer == "You"
    }
}

/// Direction of a pairwise balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceKind {
    OwesYou,
    YouOwe,
    Settled,
}

impl BalanceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::OwesYou => "owes you",
            Self::YouOwe => "you owe",
            Self::Settled => "settled",
        }
    }

    pub fn sign(self) -> &'static str {
        match self {
            Self::OwesYou => "+",
            Self::YouOwe => "-",
            Self::Settled => "",
        }
    }

    /// CSS modifier shared by the badge and amount.
    pub fn tone(self) -> &'static str {
        match self {
            Self::OwesYou => "positive",
            Self::YouOwe => "negative",
            Self::Settled => "neutral",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub person: &'static str,
    pub amount_cents: i64,
    pub kind: BalanceKind,
}

impl Balance {
    pub fn initial(&self) -> char {
        self.person.chars().next().unwrap_or('?')
    }

    /// Signed contribution to the viewer's net balance.
    pub fn net_cents(&self) -> i64 {
        match self.kind {
            BalanceKind::OwesYou => self.amount_cents,
            BalanceKind::YouOwe => -self.amount_cents,
            BalanceKind::Settled => 0,
        }
    }
}

/// Figures shown in the dashboard stat cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub net_balance_cents: i64,
    pub active_groups: usize,
    pub recent_spend_cents: i64,
    pub pending_settlements: usize,
}

/// Everything the dashboard renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardState {
    pub groups: Vec<Group>,
    pub expenses: Vec<Expense>,
    pub balances: Vec<Balance>,
    pub active_group: &'static str,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::sample()
    }
}

impl DashboardState {
    pub fn sample() -> Self {
        Self {
            groups: vec![
                Group { id: 1, name: "Roommates", members: 3, total_cents: 120_000, accent: "emerald" },
                Group { id: 2, name: "Weekend Trip", members: 5, total_cents: 85_000, accent: "blue" },
                Group { id: 3, name: "Office Lunch", members: 8, total_cents: 32_000, accent: "purple" },
                Group { id: 4, name: "Family", members: 4, total_cents: 210_000, accent: "amber" },
            ],
            expenses: vec![
                Expense {
                    id: 1,
                    description: "Grocery shopping",
                    amount_cents: 8_550,
                    payer: "You",
                    when: "Today",
                    group: "Roommates",
                },
                Expense {
                    id: 2,
                    description: "Dinner at Restaurant",
                    amount_cents: 12_000,
                    payer: "Alex",
                    when: "Yesterday",
                    group: "Weekend Trip",
                },
                Expense {
                    id: 3,
                    description: "Uber ride",
                    amount_cents: 2_475,
                    payer: "Sam",
                    when: "2 days ago",
                    group: "Roommates",
                },
                Expense {
                    id: 4,
                    description: "Movie tickets",
                    amount_cents: 6_000,
                    payer: "You",
                    when: "3 days ago",
                    group: "Office Lunch",
                },
            ],
            balances: vec![
                Balance { person: "Alex", amount_cents: 4_250, kind: BalanceKind::OwesYou },
                Balance { person: "Sam", amount_cents: 2_125, kind: BalanceKind::YouOwe },
                Balance { person: "Jordan", amount_cents: 1_500, kind: BalanceKind::Settled },
            ],
            active_group: "Roommates",
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            net_balance_cents: self.balances.iter().map(Balance::net_cents).sum(),
            active_groups: self.groups.len(),
            recent_spend_cents: self.expenses.iter().map(|e| e.amount_cents).sum(),
            pending_settlements: self.balances.iter().filter(|b| b.kind != BalanceKind::Settled).count(),
        }
    }
}

/// `$1,234.50`. Negative values keep the sign in front of the currency mark.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let rem = abs % 100;
    format!("{sign}${}.{rem:02}", group_thousands(dollars))
}

/// `+$21.25` / `-$3.00` / `$0.00`.
pub fn format_signed_money(cents: i64) -> String {
    if cents > 0 { format!("+{}", format_money(cents)) } else { format_money(cents) }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
