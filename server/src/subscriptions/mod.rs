pub mod monitored_item;
pub mod registry;
pub mod subscription;

pub use self::monitored_item::MonitoredItem;
pub use self::registry::SubscriptionRegistry;
pub use self::subscription::{Subscription, TickOutcome};
