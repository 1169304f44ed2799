pub mod stat_card;
pub mod task_row;
pub mod toast;
