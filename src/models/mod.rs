mod category;
mod info_item;
mod snapshot;
mod symbol;

pub use category::Category;
pub use info_item::InfoItem;
pub use snapshot::Snapshot;
pub use symbol::{Color, Icon};
