//! One line in the recent expenses list.

use leptos::prelude::*;

use crate::state::dashboard::{Expense, format_money};

#[component]
pub fn ExpenseRow(expense: Expense) -> impl IntoView {
    let mine = expense.paid_by_you();
    let payer_line = if mine { "You paid".to_owned() } else { format!("{} paid, you owe", expense.payer) };

    view! {
        <li class="expense-row">
            <div class="expense-row__main">
                <p class="expense-row__description">{expense.description}</p>
                <p class="expense-row__meta">
                    <span>{expense.group}</span>
                    " · "
                    <span>{expense.when}</span>
                </p>
            </div>
            <div class="expense-row__amount">
                <p class="expense-row__value">{format_money(expense.amount_cents)}</p>
                <p class="expense-row__payer" class:expense-row__payer--mine=mine>{payer_line}</p>
            </div>
        </li>
    }
}
