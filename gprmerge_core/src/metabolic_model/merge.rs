//! Merging of two GPRs describing the same reaction in two different models
//!
//! The merged GPR is active if the reaction is supported by either model, but complexes which
//! were observed in both models (possibly with different gene calls for some subunits) are
//! combined into a single complex rather than listed twice.
use std::collections::BTreeSet;

use log::debug;

use crate::metabolic_model::gpr::{Gpr, GprError, GprTag, Protein};

impl Gpr {
    /// Merge this GPR with `other`, a GPR for the same reaction from another model
    ///
    /// If either GPR is the sentinel (no gene requirement) the other GPR is returned unchanged.
    /// Otherwise each protein of `self` is either skipped (already present in `other`),
    /// aligned with a similar protein of `other`, or added as a new alternative. The result is
    /// tagged [`GprTag::MergeConflict`] if aligning subunits produced an ambiguous complex,
    /// and [`GprTag::Merge`] otherwise.
    ///
    /// The result is not reduced, see [`Gpr::reduce`].
    ///
    /// # Errors
    /// Returns [`GprError::RepresentationInvariant`] if the merged structure fails
    /// [`Gpr::check_rep`].
    ///
    /// # Examples
    /// ```rust
    /// use gprmerge_core::io::gpr_parse::parse_gpr;
    /// use gprmerge_core::metabolic_model::gpr::GprTag;
    /// let template = parse_gpr("b0001 and b0002").unwrap();
    /// let recon = parse_gpr("(b0001 or b1001) and b0002").unwrap();
    /// let merged = template.merge(&recon).unwrap();
    /// assert_eq!(merged.tag(), GprTag::Merge);
    /// assert_eq!(merged.to_rule_string(), "((b0001 or b1001) and (b0002))");
    /// ```
    pub fn merge(&self, other: &Gpr) -> Result<Gpr, GprError> {
        match (self.is_sentinel(), other.is_sentinel()) {
            // Keep the provenance of an always active reaction over a missing gene association
            (true, true) if other.tag() == GprTag::NoGene => return Ok(self.clone()),
            (true, _) => return Ok(other.clone()),
            (false, true) => return Ok(self.clone()),
            (false, false) => {}
        }

        let mut working: BTreeSet<Protein> = other.proteins().clone();
        let mut conflict = false;
        for protein in self.proteins() {
            if working.contains(protein) {
                continue;
            }
            let candidate = match find_candidate(protein, &working) {
                Some(candidate) => candidate.clone(),
                None => {
                    working.insert(protein.clone());
                    continue;
                }
            };
            match align(protein, &candidate) {
                Some(alignment) => {
                    working.remove(&candidate);
                    if alignment.conflict {
                        debug!(
                            "ambiguous subunit alignment of {} with {}, tagging as a conflict",
                            protein, candidate
                        );
                    }
                    conflict |= alignment.conflict;
                    working.insert(alignment.protein);
                }
                None => {
                    debug!(
                        "no subunit of {} aligns with {}, adding it as an alternative",
                        protein, candidate
                    );
                    working.insert(protein.clone());
                }
            }
        }

        let tag = if conflict {
            GprTag::MergeConflict
        } else {
            GprTag::Merge
        };
        Gpr::from_proteins(working, tag)
    }
}

/// Find the protein in `proteins` most similar to `protein`
///
/// Candidates have the same number of subunits and share at least one feature with `protein`.
/// Among several candidates, the one with the smallest feature id is chosen, falling back to
/// the ordering of the proteins themselves.
fn find_candidate<'a>(protein: &Protein, proteins: &'a BTreeSet<Protein>) -> Option<&'a Protein> {
    let features = protein.features();
    proteins
        .iter()
        .filter(|candidate| candidate.len() == protein.len() && candidate.shares_feature(&features))
        .min_by(|a, b| {
            a.first_feature()
                .cmp(&b.first_feature())
                .then_with(|| a.cmp(b))
        })
}

struct Alignment {
    /// Candidate complex, with aligned subunits replaced by their union
    protein: Protein,
    /// Whether a union duplicated another subunit of the candidate
    conflict: bool,
}

/// Align the subunits of `protein` with the subunits of `candidate`
///
/// Each subunit of `protein` missing from `candidate` is unioned with the first subunit of
/// `candidate` sharing a feature with it, among those not already replaced by a union. Returns
/// `None` if no subunit could be aligned.
fn align(protein: &Protein, candidate: &Protein) -> Option<Alignment> {
    let mut subunits = candidate.subunits().clone();
    let mut aligned = false;
    let mut conflict = false;
    for subunit in protein.subunits() {
        if candidate.contains_subunit(subunit) {
            continue;
        }
        let target = match candidate
            .subunits()
            .iter()
            .find(|s| subunits.contains(*s) && s.intersects(subunit))
        {
            Some(target) => target.clone(),
            None => continue,
        };
        subunits.remove(&target);
        if !subunits.insert(target.union(subunit)) {
            conflict = true;
        }
        aligned = true;
    }
    aligned.then(|| Alignment {
        protein: Protein::new(subunits),
        conflict,
    })
}
