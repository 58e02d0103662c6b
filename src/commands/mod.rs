mod category;
mod config_cmd;
mod dashboard;
mod item;
mod sync_cmd;

pub use category::CategoryCommand;
pub use config_cmd::ConfigCommand;
pub use dashboard::DashboardCommand;
pub use item::ItemCommand;
pub use sync_cmd::SyncCommand;
