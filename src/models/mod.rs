// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, InventoryItem, ItemStatus, Match, Notification, OptimizationMode, Position,
    SearchRequest, Stop,
};
pub use requests::CreateAlertRequest;
pub use responses::{AlertsSnapshot, RouteSnapshot};
