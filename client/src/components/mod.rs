//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and dashboard cards from plain props; pages
//! own context access and session actions.

pub mod app_header;
pub mod balance_row;
pub mod brand;
pub mod expense_row;
pub mod form_notice;
pub mod group_card;
pub mod stat_card;
pub mod user_badge;
