//! Pairwise balance line.

use leptos::prelude::*;

use crate::state::dashboard::{Balance, format_money};

#[component]
pub fn BalanceRow(balance: Balance) -> impl IntoView {
    let tone = balance.kind.tone();
    let amount = format!("{}{}", balance.kind.sign(), format_money(balance.amount_cents));

    view! {
        <li class=format!("balance-row balance-row--{tone}")>
            <span class="balance-row__avatar">{balance.initial()}</span>
            <span class="balance-row__body">
                <span class="balance-row__person">{balance.person}</span>
                <span class="balance-row__kind">{balance.kind.label()}</span>
            </span>
            <span class="balance-row__amount">{amount}</span>
        </li>
    }
}
