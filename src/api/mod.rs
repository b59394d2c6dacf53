mod cross_section;
mod isotope;
mod reaction;
mod pace_data;

pub use cross_section::CrossSection;
pub use pace_data::PaceData;
pub use isotope::Isotope;
pub use reaction::Reaction;