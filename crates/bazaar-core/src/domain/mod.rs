//! Domain entities - the core business objects.

mod ad;
mod category;
mod location;
mod user;

pub use ad::{Ad, AdDetail, AdPatch, NewAd};
pub use category::Category;
pub use location::Location;
pub use user::{User, UserRole};
