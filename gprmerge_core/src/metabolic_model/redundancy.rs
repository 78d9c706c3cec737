//! Removal of redundant proteins from a GPR
use std::collections::BTreeSet;

use crate::metabolic_model::gpr::{Gpr, GprError, Protein, Subunit};

impl Gpr {
    /// Remove proteins which are made redundant by a more general protein in the same GPR
    ///
    /// Protein `A` is redundant with respect to a different protein `B` when both have the same
    /// number of subunits, every feature of `A` is in `B`, and each subunit of `A` can be paired
    /// with its own subunit of `B` which contains it. A protein needing fewer subunits is never
    /// removed in favor of one needing more. e.g. `((a or b)) or ((a or b or c or d))` becomes `((a or b or c or d))`.
    /// Removal is repeated until no redundant protein remains, so reducing is idempotent.
    ///
    /// The tag is preserved.
    pub fn reduce(&self) -> Result<Gpr, GprError> {
        let mut proteins: BTreeSet<Protein> = self.proteins().clone();
        while let Some(redundant) = find_redundant(&proteins) {
            proteins.remove(&redundant);
        }
        if proteins.is_empty() {
            return Ok(Gpr::no_gene());
        }
        Gpr::from_proteins(proteins, self.tag())
    }
}

/// Find a protein in `proteins` which is subsumed by another protein
fn find_redundant(proteins: &BTreeSet<Protein>) -> Option<Protein> {
    let flattened: Vec<(&Protein, BTreeSet<String>)> =
        proteins.iter().map(|p| (p, p.features())).collect();
    for (protein, features) in &flattened {
        for (other, other_features) in &flattened {
            if protein != other && features.is_subset(other_features) && embeds(protein, other) {
                return Some((*protein).clone());
            }
        }
    }
    None
}

/// Check whether the subunits of `protein` and `other` can be paired one to one, with each
/// subunit of `protein` contained in its partner
fn embeds(protein: &Protein, other: &Protein) -> bool {
    if protein.len() != other.len() {
        return false;
    }
    let small: Vec<&Subunit> = protein.subunits().iter().collect();
    let large: Vec<&Subunit> = other.subunits().iter().collect();
    let mut owner: Vec<Option<usize>> = vec![None; large.len()];
    (0..small.len()).all(|i| {
        let mut seen = vec![false; large.len()];
        augment(i, &small, &large, &mut seen, &mut owner)
    })
}

/// Augmenting path search for the bipartite subunit matching
fn augment(
    i: usize,
    small: &[&Subunit],
    large: &[&Subunit],
    seen: &mut [bool],
    owner: &mut [Option<usize>],
) -> bool {
    for j in 0..large.len() {
        if seen[j] || !small[i].is_subset(large[j]) {
            continue;
        }
        seen[j] = true;
        let free = match owner[j] {
            None => true,
            Some(k) => augment(k, small, large, seen, owner),
        };
        if free {
            owner[j] = Some(i);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::gpr::GprTag;
    use pretty_assertions::assert_eq;

    fn gpr_of(proteins: Vec<Vec<Vec<&str>>>, tag: GprTag) -> Gpr {
        Gpr::from_proteins(
            proteins
                .into_iter()
                .map(|p| Protein::new(p.into_iter().map(Subunit::new))),
            tag,
        )
        .unwrap()
    }

    fn protein_of(subunits: Vec<Vec<&str>>) -> Protein {
        Protein::new(subunits.into_iter().map(Subunit::new))
    }

    #[test]
    fn subsumed_isozyme() {
        let gpr = gpr_of(vec![vec![vec!["g1"]], vec![vec!["g1", "g2"]]], GprTag::Genes);
        let reduced = gpr.reduce().unwrap();
        assert_eq!(
            reduced.proteins(),
            &BTreeSet::from([protein_of(vec![vec!["g1", "g2"]])])
        );
        assert_eq!(reduced.tag(), GprTag::Genes);
    }

    #[test]
    fn subunits_must_match_one_to_one() {
        // Every feature of the first protein is in the second, but both of its subunits
        // would need the single {g1, g2} subunit
        let gpr = gpr_of(
            vec![vec![vec!["g1"], vec!["g2"]], vec![vec!["g1", "g2"]]],
            GprTag::Genes,
        );
        assert_eq!(gpr.reduce().unwrap(), gpr);

        // Subsets of distinct subunits
        let gpr = gpr_of(
            vec![
                vec![vec!["a"], vec!["b"], vec!["d"]],
                vec![vec!["a", "b"], vec!["b", "c"], vec!["d"]],
            ],
            GprTag::Merge,
        );
        let reduced = gpr.reduce().unwrap();
        assert_eq!(
            reduced.proteins(),
            &BTreeSet::from([protein_of(vec![vec!["a", "b"], vec!["b", "c"], vec!["d"]])])
        );
        assert_eq!(reduced.tag(), GprTag::Merge);
    }

    #[test]
    fn smaller_complexes_are_kept() {
        // ((a or b)) needs fewer genes than ((a or b) and (c)), neither is redundant
        let gpr = gpr_of(
            vec![vec![vec!["a", "b"]], vec![vec!["a", "b"], vec!["c"]]],
            GprTag::Genes,
        );
        assert_eq!(gpr.reduce().unwrap(), gpr);
        assert!(!embeds(
            &protein_of(vec![vec!["a", "b"]]),
            &protein_of(vec![vec!["a", "b"], vec!["c"]])
        ));

        // g1 alone is enough in the template, reducing the merge must not require g2
        let template = gpr_of(vec![vec![vec!["g1"]]], GprTag::Genes);
        let recon = gpr_of(vec![vec![vec!["g1"], vec!["g2"]]], GprTag::Genes);
        let reduced = template.merge(&recon).unwrap().reduce().unwrap();
        assert!(reduced.contains_protein(&protein_of(vec![vec!["g1"]])));
        assert!(reduced.contains_protein(&protein_of(vec![vec!["g1"], vec!["g2"]])));
    }

    #[test]
    fn matching_needs_augmenting_paths() {
        // A greedy matching would pair {a} with {a, b} and leave {b} without a subunit
        let protein = protein_of(vec![vec!["a"], vec!["b"]]);
        let other = protein_of(vec![vec!["a", "b"], vec!["a", "c"]]);
        assert!(embeds(&protein, &other));
        assert!(!embeds(&other, &protein));
    }

    #[test]
    fn chains_reduce_to_the_most_general() {
        let gpr = gpr_of(
            vec![
                vec![vec!["a"]],
                vec![vec!["a", "b"]],
                vec![vec!["a", "b", "c"]],
                vec![vec!["d"], vec!["e"]],
            ],
            GprTag::Genes,
        );
        let reduced = gpr.reduce().unwrap();
        assert_eq!(
            reduced.proteins(),
            &BTreeSet::from([
                protein_of(vec![vec!["a", "b", "c"]]),
                protein_of(vec![vec!["d"], vec!["e"]]),
            ])
        );
    }

    #[test]
    fn idempotent() {
        let gprs = vec![
            gpr_of(vec![vec![vec!["g1"]], vec![vec!["g1", "g2"]]], GprTag::Genes),
            gpr_of(
                vec![
                    vec![vec!["a"], vec!["b"]],
                    vec![vec!["a", "b"], vec!["a", "c"]],
                    vec![vec!["c"]],
                    vec![vec!["c", "d"], vec!["e"]],
                ],
                GprTag::MergeConflict,
            ),
            Gpr::no_gene(),
            Gpr::spontaneous(),
        ];
        for gpr in gprs {
            let once = gpr.reduce().unwrap();
            let twice = once.reduce().unwrap();
            assert_eq!(once, twice);
            assert_eq!(once.features(), &crate::metabolic_model::gpr::flatten(once.proteins()));
        }
    }

    #[test]
    fn sentinels_are_preserved() {
        assert_eq!(Gpr::spontaneous().reduce().unwrap(), Gpr::spontaneous());
        assert_eq!(Gpr::universal().reduce().unwrap(), Gpr::universal());
        assert_eq!(Gpr::no_gene().reduce().unwrap(), Gpr::no_gene());
    }
}
