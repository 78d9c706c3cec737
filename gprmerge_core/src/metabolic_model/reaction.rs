//! This module provides a struct for representing reactions
use derive_builder::Builder;

use crate::metabolic_model::builder::ReactionProtein;
use crate::metabolic_model::gpr::{Gpr, GprError};

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct ModelReaction {
    /// Used to identify the reaction
    pub id: String,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Gene Protein Reaction rule describing which genes can catalyze the reaction
    #[builder(default = "Gpr::no_gene()")]
    pub gpr: Gpr,
}

impl ModelReaction {
    /// Create a new reaction, building its GPR from the raw protein records
    ///
    /// # Errors
    /// Returns [`GprError::MalformedRecord`] if a protein record is malformed, in which case
    /// the reaction can be skipped.
    pub fn from_protein_records(
        id: &str,
        name: Option<String>,
        records: &[ReactionProtein],
    ) -> Result<ModelReaction, GprError> {
        Ok(ModelReaction {
            id: id.to_string(),
            name,
            gpr: Gpr::from_protein_records(records)?,
        })
    }

    /// Whether the reaction can carry flux without any gene evidence
    pub fn is_always_active(&self) -> bool {
        self.gpr.tag().is_always_active()
    }
}
