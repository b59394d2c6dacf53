mod binary_format;
mod helper_functions;
mod testing;

pub use binary_format::PaceMmap;

pub use helper_functions::read_lines;
pub use helper_functions::compute_temperature_from_kT;

pub use testing::{is_ascii_file, get_parsed_test_file, local_get_parsed_test_file, get_isotope, local_get_isotope};