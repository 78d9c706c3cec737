//! Conversion of raw reaction protein records, as provided by model loaders, into [`Gpr`]s
use std::collections::BTreeSet;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::configuration::Configuration;
use crate::metabolic_model::gpr::{Gpr, GprError, GprTag, Protein, Subunit};

/// A raw protein (complex) record of a reaction
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionProtein {
    /// Free form note, `"spontaneous"` and `"universal"` mark reactions which need no genes
    #[serde(default)]
    pub note: String,
    /// Subunits required by the complex
    #[serde(rename = "modelReactionProteinSubunits", default)]
    pub subunits: Vec<ReactionProteinSubunit>,
}

/// A raw subunit record of a reaction protein
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionProteinSubunit {
    /// References to the features which can fill this subunit role, possibly namespaced
    /// (e.g. `"ws/obj/feature_id"`)
    ///
    /// Required, a missing list makes the record malformed.
    pub feature_refs: Option<Vec<String>>,
}

impl ReactionProteinSubunit {
    pub fn new<I, S>(feature_refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReactionProteinSubunit {
            feature_refs: Some(feature_refs.into_iter().map(Into::into).collect()),
        }
    }
}

impl Gpr {
    /// Build a GPR from the protein records of a reaction
    ///
    /// If any record is noted as `"spontaneous"` or `"universal"`, the matching sentinel is
    /// returned and the subunit data is ignored. Otherwise empty subunits and proteins are
    /// dropped, and if nothing remains the [`GprTag::NoGene`] sentinel is returned.
    ///
    /// # Errors
    /// Returns [`GprError::MalformedRecord`] if a subunit record has no `feature_refs`.
    ///
    /// # Examples
    /// ```rust
    /// use gprmerge_core::metabolic_model::builder::{ReactionProtein, ReactionProteinSubunit};
    /// use gprmerge_core::metabolic_model::gpr::{Gpr, GprTag};
    /// let record = ReactionProtein {
    ///     note: String::new(),
    ///     subunits: vec![ReactionProteinSubunit::new(["genome/features/b3916"])],
    /// };
    /// let gpr = Gpr::from_protein_records(&[record]).unwrap();
    /// assert_eq!(gpr.tag(), GprTag::Genes);
    /// assert!(gpr.contains_feature("b3916"));
    /// ```
    pub fn from_protein_records(records: &[ReactionProtein]) -> Result<Gpr, GprError> {
        if let Some(tag) = records.iter().find_map(|r| GprTag::from_note(&r.note)) {
            return Ok(Gpr::sentinel(tag));
        }
        let separator = Configuration::current().feature_ref_separator;
        let mut proteins: BTreeSet<Protein> = BTreeSet::new();
        for (protein_index, record) in records.iter().enumerate() {
            let mut subunits: BTreeSet<Subunit> = BTreeSet::new();
            for (subunit_index, subunit) in record.subunits.iter().enumerate() {
                let feature_refs = subunit.feature_refs.as_ref().ok_or_else(|| {
                    GprError::MalformedRecord(format!(
                        "subunit {} of protein {} has no feature_refs",
                        subunit_index, protein_index
                    ))
                })?;
                let features = Subunit::new(
                    feature_refs
                        .iter()
                        .filter_map(|reference| feature_id(reference, separator)),
                );
                if features.is_empty() {
                    trace!(
                        "dropping empty subunit {} of protein {}",
                        subunit_index,
                        protein_index
                    );
                    continue;
                }
                subunits.insert(features);
            }
            if subunits.is_empty() {
                trace!("dropping protein {} without subunits", protein_index);
                continue;
            }
            proteins.insert(Protein::new(subunits));
        }
        if proteins.is_empty() {
            return Ok(Gpr::no_gene());
        }
        Gpr::from_proteins(proteins, GprTag::Genes)
    }

    /// Convert the GPR back into raw protein records
    ///
    /// Spontaneous and universal reactions produce a single record carrying the note, reactions
    /// without genes produce no records.
    pub fn to_protein_records(&self) -> Vec<ReactionProtein> {
        if self.tag().is_always_active() {
            return vec![ReactionProtein {
                note: self.tag().to_string(),
                subunits: Vec::new(),
            }];
        }
        if self.is_sentinel() {
            return Vec::new();
        }
        self.proteins()
            .iter()
            .map(|protein| ReactionProtein {
                note: String::new(),
                subunits: protein
                    .subunits()
                    .iter()
                    .map(|subunit| ReactionProteinSubunit::new(subunit.features().iter()))
                    .collect(),
            })
            .collect()
    }
}

/// The feature id is the final segment of a (possibly namespaced) feature reference
fn feature_id(reference: &str, separator: char) -> Option<String> {
    reference
        .rsplit(separator)
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(note: &str, subunits: Vec<Vec<&str>>) -> ReactionProtein {
        ReactionProtein {
            note: note.to_string(),
            subunits: subunits
                .into_iter()
                .map(ReactionProteinSubunit::new)
                .collect(),
        }
    }

    #[test]
    fn namespaced_features() {
        assert_eq!(feature_id("ws/obj/b0001", '/'), Some("b0001".to_string()));
        assert_eq!(feature_id("b0001", '/'), Some("b0001".to_string()));
        assert_eq!(
            feature_id("kb|g.587.peg.1234", '/'),
            Some("kb|g.587.peg.1234".to_string())
        );
        assert_eq!(feature_id("ws/obj/", '/'), None);
        // Ids are taken verbatim
        assert_eq!(feature_id("ws/obj/ b0001", '/'), Some(" b0001".to_string()));
    }

    #[test]
    fn build_complex() {
        let records = vec![
            record("", vec![vec!["ws/1/b1", "ws/1/b2"], vec!["ws/1/b3"]]),
            record("some note", vec![vec!["ws/1/b4"]]),
        ];
        let gpr = Gpr::from_protein_records(&records).unwrap();
        assert_eq!(gpr.tag(), GprTag::Genes);
        assert_eq!(gpr.proteins().len(), 2);
        assert!(gpr.contains_protein(&Protein::new([
            Subunit::new(["b1", "b2"]),
            Subunit::new(["b3"])
        ])));
        assert!(gpr.contains_protein(&Protein::new([Subunit::new(["b4"])])));
        assert_eq!(gpr.render(), "(((b1 or b2) and (b3)) or ((b4)))");
    }

    #[test]
    fn empty_parts_are_dropped() {
        let records = vec![
            record("", vec![vec![], vec!["b1"]]),
            record("", vec![vec![]]),
            record("", vec![]),
        ];
        let gpr = Gpr::from_protein_records(&records).unwrap();
        assert_eq!(gpr.proteins().len(), 1);
        assert!(gpr.contains_protein(&Protein::new([Subunit::new(["b1"])])));
    }

    #[test]
    fn no_genes() {
        let gpr = Gpr::from_protein_records(&[]).unwrap();
        assert_eq!(gpr, Gpr::no_gene());
        let gpr = Gpr::from_protein_records(&[record("", vec![vec![]])]).unwrap();
        assert_eq!(gpr, Gpr::no_gene());
    }

    #[test]
    fn special_notes() {
        let gpr = Gpr::from_protein_records(&[record("spontaneous", vec![vec!["b1"]])]).unwrap();
        assert_eq!(gpr, Gpr::spontaneous());
        assert!(gpr.is_empty());
        assert!(gpr.tag().is_always_active());

        // The note wins even if other proteins list genes
        let records = vec![record("", vec![vec!["b1"]]), record("universal", vec![])];
        let gpr = Gpr::from_protein_records(&records).unwrap();
        assert_eq!(gpr, Gpr::universal());
    }

    #[test]
    fn missing_feature_refs() {
        let records = vec![ReactionProtein {
            note: String::new(),
            subunits: vec![ReactionProteinSubunit { feature_refs: None }],
        }];
        match Gpr::from_protein_records(&records) {
            Err(GprError::MalformedRecord(_)) => {}
            other => panic!("Expected a malformed record error, got {:?}", other),
        }
    }

    #[test]
    fn missing_feature_refs_from_json() {
        let data = r#"[{"note": "", "modelReactionProteinSubunits": [{"role": "kinase"}]}]"#;
        let records: Vec<ReactionProtein> = serde_json::from_str(data).unwrap();
        assert!(matches!(
            Gpr::from_protein_records(&records),
            Err(GprError::MalformedRecord(_))
        ));
    }

    #[test]
    fn records_round_trip() {
        let records = vec![
            record("", vec![vec!["b1", "b2"], vec!["b3"]]),
            record("", vec![vec!["b4"]]),
        ];
        let gpr = Gpr::from_protein_records(&records).unwrap();
        let rebuilt = Gpr::from_protein_records(&gpr.to_protein_records()).unwrap();
        assert_eq!(rebuilt, gpr);

        assert!(Gpr::no_gene().to_protein_records().is_empty());
        let spontaneous = Gpr::from_protein_records(&Gpr::spontaneous().to_protein_records());
        assert_eq!(spontaneous.unwrap(), Gpr::spontaneous());
    }
}
