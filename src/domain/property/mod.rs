mod boolean_property;
mod number_property;
mod property;
mod select_property;
mod time_property;

pub use boolean_property::BooleanProperty;
pub use number_property::{NumberProperty, Unit};
pub use property::{PatchTarget, Property, PropertyError, PropertyType};
pub use select_property::SelectProperty;
pub use time_property::TimeProperty;
