// Service exports
pub mod inventory;
pub mod location;

pub use inventory::{demo_feed, InMemoryFeed, InventoryFeed};
pub use location::{DeniedLocation, LocationError, LocationProvider, StaticLocation};
