mod free_gas;
mod nu_sampler;

pub use free_gas::{scatter_free_gas, FREE_GAS_THRESHOLD_EV};
pub use nu_sampler::sample_nu;
