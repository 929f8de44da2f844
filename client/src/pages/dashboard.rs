//! Dashboard page: summary cards, groups, recent expenses and balances.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route and the default post-login
//! target. Content renders from `state::dashboard` sample data.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::User;

use crate::components::app_header::AppHeader;
use crate::components::balance_row::BalanceRow;
use crate::components::expense_row::ExpenseRow;
use crate::components::group_card::GroupCard;
use crate::components::stat_card::StatCard;
use crate::state::auth::AuthState;
use crate::state::dashboard::{DashboardState, Summary, format_money, format_signed_money};
use crate::util::auth::RequireSession;

pub(crate) fn greeting(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Welcome back, {}!", user.username),
        None => "Welcome back!".to_owned(),
    }
}

pub(crate) fn balance_caption(summary: &Summary) -> &'static str {
    match summary.net_balance_cents {
        n if n > 0 => "You are owed",
        n if n < 0 => "You owe",
        _ => "All settled up",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RequireSession>
            <DashboardContent />
        </RequireSession>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let dashboard = RwSignal::new(DashboardState::sample());
    let summary = dashboard.with_untracked(DashboardState::summary);
    let on_select = Callback::new(move |name: &'static str| dashboard.update(|d| d.active_group = name));

    view! {
        <div class="dashboard-page">
            <AppHeader />
            <main class="dashboard-page__main">
                <section class="dashboard-page__welcome">
                    <h1>{move || greeting(auth_state.get().user())}</h1>
                    <p>"Here's an overview of your shared expenses."</p>
                </section>

                <section class="dashboard-page__stats">
                    <StatCard
                        label="Total Balance"
                        value=format_signed_money(summary.net_balance_cents)
                        caption=balance_caption(&summary)
                        tone=if summary.net_balance_cents < 0 { "negative" } else { "positive" }
                    />
                    <StatCard
                        label="Active Groups"
                        value=summary.active_groups.to_string()
                        caption="Across all your circles"
                    />
                    <StatCard
                        label="Recent Spending"
                        value=format_money(summary.recent_spend_cents)
                        caption="Last few expenses"
                    />
                    <StatCard
                        label="Pending"
                        value=summary.pending_settlements.to_string()
                        caption="Balances to settle"
                    />
                </section>

                <section class="dashboard-page__groups">
                    <h2>"Your Groups"</h2>
                    <div class="dashboard-page__group-grid">
                        {dashboard
                            .with_untracked(|d| d.groups.clone())
                            .into_iter()
                            .map(|group| {
                                let name = group.name;
                                let active = Signal::derive(move || dashboard.with(|d| d.active_group == name));
                                view! { <GroupCard group=group active=active on_select=on_select /> }
                            })
                            .collect_view()}
                    </div>
                </section>

                <div class="dashboard-page__columns">
                    <section class="dashboard-page__expenses">
                        <h2>"Recent Expenses"</h2>
                        <ul>
                            {dashboard
                                .with_untracked(|d| d.expenses.clone())
                                .into_iter()
                                .map(|expense| view! { <ExpenseRow expense=expense /> })
                                .collect_view()}
                        </ul>
                    </section>
                    <section class="dashboard-page__balances">
                        <h2>"Balances"</h2>
                        <ul>
                            {dashboard
                                .with_untracked(|d| d.balances.clone())
                                .into_iter()
                                .map(|balance| view! { <BalanceRow balance=balance /> })
                                .collect_view()}
                        </ul>
                    </section>
                </div>
            </main>
        </div>
    }
}
