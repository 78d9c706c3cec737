//! Module for reading and writing GPRs and the reaction records of Models
pub mod gpr_parse;
pub mod json;
