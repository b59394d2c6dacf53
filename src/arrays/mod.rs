mod izaw;
mod jxs;
mod nxs;

pub use izaw::{IzawArray, IzawPair};
pub use jxs::JxsArray;
pub use nxs::NxsArray;

// Raw XXS data array, interpreted word-by-word as either f64 or
// (via `.to_bits() as usize/isize`) an encoded integer, per the ACE
// binary convention.
pub type XxsArray = [f64];

// The three descriptor arrays of an ACE table plus the raw XXS data
// array they describe. Every data block's `pull_from_xxs_array` reads
// through this bundle to find its own slice of `xxs`.
pub struct Arrays<'a> {
    pub nxs: &'a NxsArray,
    pub jxs: &'a JxsArray,
    pub xxs: &'a XxsArray,
}
