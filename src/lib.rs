#![allow(non_snake_case, clippy::upper_case_acronyms)]

mod angular_distributions;
mod api;
mod arrays;
mod blocks;
pub mod config;
mod error;
mod geometry;
mod grids;
mod header;
mod interpolation;
mod logging;
mod material;
mod particle;
mod random;
mod reactions;
mod simulation;
mod source;
mod utils;
mod xsdir;

mod helpers;
mod unitf64;

pub use api::{CrossSection, Isotope, PaceData, Reaction};
pub use error::{Result, TransportError};
pub use geometry::{build_geometry, setup_materials, Cell, Geometry, GeometryIndex, Surface, SurfaceFlag, SurfaceKind, Transformation, Universe, Vec3};
pub use grids::{ChildGrid, EnergyHint, MasterGrid};
pub use logging::Logger;
pub use material::{Material, MaterialComponent};
pub use particle::{Particle, ParticleState};
pub use random::Random;
pub use simulation::{Diagnostics, KeffEstimate, KeffSimulation, Settings};
pub use source::{Distribution, ParticleSampler, ParticleSource, Source};
pub use xsdir::Xsdir;