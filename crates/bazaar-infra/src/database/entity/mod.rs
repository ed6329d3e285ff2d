//! SeaORM entities.

pub mod ad;
pub mod category;
pub mod location;
pub mod user;
pub mod user_location;
