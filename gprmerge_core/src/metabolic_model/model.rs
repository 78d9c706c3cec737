//! This module provides the Model struct for representing the reactions of a metabolic model,
//! along with cross model GPR reconciliation
use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::configuration::Configuration;
use crate::metabolic_model::gpr::{Gpr, GprError, GprTag};
use crate::metabolic_model::reaction::ModelReaction;

/// Represents the reactions of a Genome Scale Metabolic Model, along with their GPRs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    /// Id associated with the Model
    pub id: Option<String>,
    /// Map of reaction ids to reactions
    pub reactions: IndexMap<String, ModelReaction>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            id: None,
            reactions: IndexMap::new(),
        }
    }

    /// Add a reaction to the model, replacing any reaction with the same id
    ///
    /// # Examples
    /// ```rust
    /// use gprmerge_core::metabolic_model::model::Model;
    /// use gprmerge_core::metabolic_model::reaction::ModelReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ModelReactionBuilder::default().id("rxn00001_c0".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: ModelReaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Remove a reaction from the model, returning it if it was present
    pub fn remove_reaction(&mut self, reaction_id: &str) -> Option<ModelReaction> {
        let removed = self.reactions.shift_remove(reaction_id);
        if removed.is_none() {
            warn!("reaction {} not in model", reaction_id);
        }
        removed
    }

    /// Every feature referenced by the GPR of any reaction in the model
    pub fn features(&self) -> BTreeSet<String> {
        self.reactions
            .values()
            .flat_map(|reaction| reaction.gpr.features().iter().cloned())
            .collect()
    }

    /// Ids of reactions present in both models whose GPRs have different structures
    pub fn reactions_with_different_gprs(&self, other: &Model) -> Vec<String> {
        self.reactions
            .iter()
            .filter_map(|(id, reaction)| {
                let other_reaction = other.reactions.get(id)?;
                (reaction.gpr.proteins() != other_reaction.gpr.proteins()).then(|| id.clone())
            })
            .collect()
    }

    /// Merge the GPR of every reaction of this model with the GPR of the matching reaction
    /// in `other`
    ///
    /// If [`Configuration::reduce_after_merge`] is set, redundant proteins are removed from
    /// each merged GPR.
    ///
    /// # Errors
    /// Returns [`GprError::RepresentationInvariant`] if merging any reaction fails, this
    /// indicates a logic error and the whole reconciliation is abandoned.
    pub fn merge_gprs(&self, other: &Model) -> Result<GprReconciliation, GprError> {
        let reduce = Configuration::current().reduce_after_merge;
        let mut reconciliation = GprReconciliation::default();
        for (id, reaction) in &self.reactions {
            let Some(other_reaction) = other.reactions.get(id) else {
                continue;
            };
            let mut merged = reaction.gpr.merge(&other_reaction.gpr)?;
            if reduce {
                merged = merged.reduce()?;
            }
            if merged.tag() == GprTag::MergeConflict {
                debug!("GPR merge of reaction {} needs review: {}", id, merged);
                reconciliation.conflicts.push(id.clone());
            }
            reconciliation.merged.insert(id.clone(), merged);
        }
        reconciliation.unmatched = other
            .reactions
            .keys()
            .filter(|id| !self.reactions.contains_key(*id))
            .cloned()
            .collect();
        Ok(reconciliation)
    }

    /// Create a copy of the model where the GPR of each reaction shared with `other` has been
    /// replaced by the merged GPR (see [`Model::merge_gprs`])
    pub fn with_merged_gprs(&self, other: &Model) -> Result<Model, GprError> {
        let mut reconciliation = self.merge_gprs(other)?;
        let mut model = self.clone();
        for (id, reaction) in model.reactions.iter_mut() {
            if let Some(gpr) = reconciliation.merged.shift_remove(id) {
                reaction.gpr = gpr;
            }
        }
        Ok(model)
    }
}

/// Result of merging the GPRs of two models
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GprReconciliation {
    /// Merged GPR for each reaction present in both models
    pub merged: IndexMap<String, Gpr>,
    /// Ids of reactions whose merged GPR is tagged [`GprTag::MergeConflict`]
    pub conflicts: Vec<String>,
    /// Ids of reactions only present in the other model
    pub unmatched: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::gpr_parse::parse_gpr;
    use crate::metabolic_model::reaction::ModelReactionBuilder;
    use pretty_assertions::assert_eq;

    fn reaction(id: &str, gpr: Gpr) -> ModelReaction {
        ModelReactionBuilder::default()
            .id(id.to_string())
            .gpr(gpr)
            .build()
            .unwrap()
    }

    fn setup_models() -> (Model, Model) {
        let mut template = Model::new_empty();
        template.add_reaction(reaction("PFK", parse_gpr("b3916").unwrap()));
        template.add_reaction(reaction("PGK", parse_gpr("b2926").unwrap()));
        template.add_reaction(reaction("H2Ot", Gpr::spontaneous()));
        template.add_reaction(reaction(
            "CYTBD",
            parse_gpr("(b0978 and b0979) or (b0733 and b0734)").unwrap(),
        ));

        let mut recon = Model::new_empty();
        recon.add_reaction(reaction("PFK", parse_gpr("b3916 or b1723").unwrap()));
        recon.add_reaction(reaction("PGK", Gpr::no_gene()));
        recon.add_reaction(reaction("H2Ot", Gpr::no_gene()));
        recon.add_reaction(reaction(
            "CYTBD",
            parse_gpr("(b0978 and b0979) or (b0733 and b0735)").unwrap(),
        ));
        recon.add_reaction(reaction("ENO", parse_gpr("b2779").unwrap()));
        (template, recon)
    }

    #[test]
    fn add_and_remove() {
        let (mut template, _) = setup_models();
        assert_eq!(template.reactions.len(), 4);
        let removed = template.remove_reaction("PGK").unwrap();
        assert_eq!(removed.id, "PGK");
        assert_eq!(template.reactions.len(), 3);
        assert!(template.remove_reaction("PGK").is_none());
        // Order of the remaining reactions is kept
        let ids: Vec<&String> = template.reactions.keys().collect();
        assert_eq!(ids, vec!["PFK", "H2Ot", "CYTBD"]);
    }

    #[test]
    fn model_features() {
        let (template, recon) = setup_models();
        let expected: BTreeSet<String> = ["b3916", "b2926", "b0978", "b0979", "b0733", "b0734"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(template.features(), expected);
        assert!(recon.features().contains("b2779"));
        assert!(!recon.features().contains("b2926"));
    }

    #[test]
    fn different_gprs() {
        let (template, recon) = setup_models();
        let different = template.reactions_with_different_gprs(&recon);
        // H2Ot only differs in tag
        assert_eq!(different, vec!["PFK", "PGK", "CYTBD"]);
    }

    #[test]
    fn reconcile() {
        let (template, recon) = setup_models();
        let reconciliation = template.merge_gprs(&recon).unwrap();
        assert_eq!(reconciliation.unmatched, vec!["ENO"]);
        assert!(reconciliation.conflicts.is_empty());

        let pfk = &reconciliation.merged["PFK"];
        assert_eq!(pfk.tag(), GprTag::Merge);
        assert_eq!(pfk.features().len(), 2);

        // No gene associations in the other model keep the template GPR
        assert_eq!(reconciliation.merged["PGK"], template.reactions["PGK"].gpr);
        assert_eq!(reconciliation.merged["H2Ot"], Gpr::spontaneous());

        let cytbd = &reconciliation.merged["CYTBD"];
        // The second complexes share a subunit, but b0734 and b0735 can't be aligned
        assert_eq!(cytbd.proteins().len(), 3);
        assert!(cytbd.contains_feature("b0734"));
        assert!(cytbd.contains_feature("b0735"));
    }

    #[test]
    fn with_merged_gprs() {
        let (template, recon) = setup_models();
        let merged = template.with_merged_gprs(&recon).unwrap();
        assert_eq!(merged.reactions.len(), template.reactions.len());
        assert!(merged.reactions["PFK"].gpr.contains_feature("b1723"));
        assert!(!merged.reactions.contains_key("ENO"));
        // The original model is untouched
        assert!(!template.reactions["PFK"].gpr.contains_feature("b1723"));
    }
}
