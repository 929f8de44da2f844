use super::*;

// =============================================================
// Summary
// =============================================================

#[test]
fn sample_summary_nets_balances() {
    let summary = DashboardState::sample().summary();
    assert_eq!(summary.net_balance_cents, 2_125);
    assert_eq!(summary.active_groups, 4);
    assert_eq!(summary.recent_spend_cents, 29_025);
    assert_eq!(summary.pending_settlements, 2);
}

#[test]
fn settled_balance_contributes_nothing() {
    let balance = Balance { person: "Jordan", amount_cents: 1_500, kind: BalanceKind::Settled };
    assert_eq!(balance.net_cents(), 0);
    assert_eq!(balance.initial(), 'J');
}

#[test]
fn expense_paid_by_you_matches_payer_label() {
    let state = DashboardState::sample();
    let mine: Vec<_> = state.expenses.iter().filter(|e| e.paid_by_you()).map(|e| e.id).collect();
    assert_eq!(mine, vec![1, 4]);
}

// =============================================================
// Formatting
// =============================================================

#[test]
fn format_money_pads_cents_and_groups_thousands() {
    assert_eq!(format_money(0), "$0.00");
    assert_eq!(format_money(8_550), "$85.50");
    assert_eq!(format_money(210_000), "$2,100.00");
    assert_eq!(format_money(123_456_789), "$1,234,567.89");
}

#[test]
fn format_money_keeps_sign_before_currency() {
    assert_eq!(format_money(-2_125), "-$21.25");
}

#[test]
fn format_signed_money_marks_positive_values() {
    assert_eq!(format_signed_money(2_125), "+$21.25");
    assert_eq!(format_signed_money(-300), "-$3.00");
    assert_eq!(format_signed_money(0), "$0.00");
}

#[test]
fn balance_kind_labels() {
    assert_eq!(BalanceKind::OwesYou.label(), "owes you");
    assert_eq!(BalanceKind::YouOwe.sign(), "-");
    assert_eq!(BalanceKind::Settled.tone(), "neutral");
}
