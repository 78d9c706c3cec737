//! Core rust implementation of gprmerge, a crate for representing, merging and simplifying the
//! Gene Protein Reaction rules of genome scale metabolic models.

pub mod configuration;
pub mod io;
pub mod metabolic_model;
mod utils;
