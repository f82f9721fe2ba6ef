pub mod audit;
pub mod disable;
pub mod dispatch;
pub mod enable;
pub mod history;
pub mod list;
pub mod periods;
pub mod reschedule;
pub mod shared;
pub mod summary;
pub mod templates;
pub mod touch;
