//! Module providing the GPR representation and the Model struct for representing the
//! reactions of a metabolic model.

pub mod builder;
pub mod gpr;
pub mod merge;
pub mod model;
pub mod reaction;
pub mod redundancy;
