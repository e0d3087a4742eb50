pub mod metric_card;
pub mod nav;
pub mod pager;
pub mod states;
pub mod status_badge;
pub mod toast;
