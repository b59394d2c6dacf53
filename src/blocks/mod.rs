mod block_types;
pub(crate) mod block_traits;
mod block_processor;
mod esz;
mod mtr;
mod lsig;
mod sig;
mod lqr;
mod nu;
mod dnu;
mod bdd;
mod tyr;
mod land;
mod and;
mod ldlw;
mod dlw;
mod fis;

pub use block_types::BlockType;
pub use block_processor::DataBlocks;

pub use esz::ESZ;
pub use mtr::MTR;
pub use lsig::LSIG;
pub use sig::{SigCrossSection, SIG};
pub use lqr::LQR;
pub use nu::{NuFormulation, PolynomialNu, TabulatedNu, NU};
pub use dnu::DNU;
pub use bdd::BDD;
pub use tyr::{ExitingNeutronData, ExitingNeutronFrameOfReference, NumberOfExitingNeutrons, TYR};
pub use land::LAND;
pub use and::AND;
pub use ldlw::LDLW;
pub use dlw::{EnergyDistributionLaw, EnergyLawEntry, KalbachEnergyPoint, ReactionEnergyDistribution, DLW};
pub use fis::FIS;
