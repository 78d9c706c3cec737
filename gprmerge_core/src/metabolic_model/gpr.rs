//! This module provides the GPR value types, representing the Gene Protein Reaction relationship
//! of a single reaction as a set of alternative protein complexes.
//!
//! A [`Gpr`] is an OR over [`Protein`]s, each [`Protein`] is an AND over [`Subunit`]s, and each
//! [`Subunit`] is an OR over features (gene ids). All containers are sorted sets, so equality,
//! hashing, iteration and rendering never depend on insertion order.
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::hashing::hash_as_hex_string;

// region Subunit
/// A set of interchangeable features, any one of which can fill a single role in a complex
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subunit {
    features: BTreeSet<String>,
}

impl Subunit {
    /// Create a new subunit from an iterator of feature ids
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Subunit {
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// Features which can fill this subunit role
    pub fn features(&self) -> &BTreeSet<String> {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Check whether this subunit shares at least one feature with `other`
    pub fn intersects(&self, other: &Subunit) -> bool {
        !self.features.is_disjoint(&other.features)
    }

    pub fn is_subset(&self, other: &Subunit) -> bool {
        self.features.is_subset(&other.features)
    }

    /// Create a new subunit accepting the features of either `self` or `other`
    pub fn union(&self, other: &Subunit) -> Subunit {
        Subunit {
            features: self.features.union(&other.features).cloned().collect(),
        }
    }
}

impl Display for Subunit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let features: Vec<&str> = self.features.iter().map(String::as_str).collect();
        write!(f, "({})", features.join(" or "))
    }
}
// endregion Subunit

// region Protein
/// A protein complex, which requires all of its subunits
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Protein {
    subunits: BTreeSet<Subunit>,
}

impl Protein {
    /// Create a new protein complex from an iterator of subunits
    pub fn new<I: IntoIterator<Item = Subunit>>(subunits: I) -> Self {
        Protein {
            subunits: subunits.into_iter().collect(),
        }
    }

    pub fn subunits(&self) -> &BTreeSet<Subunit> {
        &self.subunits
    }

    /// Number of subunits in the complex
    pub fn len(&self) -> usize {
        self.subunits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subunits.is_empty()
    }

    pub fn contains_subunit(&self, subunit: &Subunit) -> bool {
        self.subunits.contains(subunit)
    }

    /// All features found in any subunit of this complex
    pub fn features(&self) -> BTreeSet<String> {
        self.subunits
            .iter()
            .flat_map(|subunit| subunit.features.iter().cloned())
            .collect()
    }

    /// Lexicographically smallest feature id in the complex
    pub fn first_feature(&self) -> Option<&str> {
        self.subunits
            .iter()
            .filter_map(|subunit| subunit.features.first())
            .min()
            .map(String::as_str)
    }

    pub(crate) fn shares_feature(&self, features: &BTreeSet<String>) -> bool {
        self.subunits
            .iter()
            .any(|subunit| !subunit.features.is_disjoint(features))
    }
}

impl Display for Protein {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let subunits: Vec<String> = self.subunits.iter().map(Subunit::to_string).collect();
        write!(f, "({})", subunits.join(" and "))
    }
}
// endregion Protein

// region Tag
/// Where a [`Gpr`] came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GprTag {
    /// The reaction has no associated genes
    NoGene,
    /// The reaction occurs spontaneously, so it is always active
    Spontaneous,
    /// The reaction is universal, so it is always active
    Universal,
    /// The GPR was built from gene annotations
    Genes,
    /// The GPR is the result of merging two GPRs
    Merge,
    /// The GPR is the result of merging two GPRs, but a subunit alignment was ambiguous and
    /// should be reviewed
    MergeConflict,
}

impl GprTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            GprTag::NoGene => "no-gene",
            GprTag::Spontaneous => "spontaneous",
            GprTag::Universal => "universal",
            GprTag::Genes => "genes",
            GprTag::Merge => "merge",
            GprTag::MergeConflict => "merge-conflict",
        }
    }

    /// Whether the tag is only ever carried by the sentinel (feature free) expression
    pub fn is_sentinel(&self) -> bool {
        matches!(self, GprTag::NoGene | GprTag::Spontaneous | GprTag::Universal)
    }

    /// Whether a reaction with this tag is active without any gene evidence
    pub fn is_always_active(&self) -> bool {
        matches!(self, GprTag::Spontaneous | GprTag::Universal)
    }

    /// Tag associated with a reaction protein note, if the note is one of the recognized values
    pub(crate) fn from_note(note: &str) -> Option<GprTag> {
        match note {
            "spontaneous" => Some(GprTag::Spontaneous),
            "universal" => Some(GprTag::Universal),
            _ => None,
        }
    }
}

impl Display for GprTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
// endregion Tag

// region Gpr
/// Representation of a Gene Protein Reaction rule as a set of alternative protein complexes
///
/// A `Gpr` is immutable. Every operation ([`Gpr::merge`], [`Gpr::reduce`]) creates a new value,
/// and every constructor checks the representation invariant before returning, so an existing
/// `Gpr` is always valid.
///
/// The expression with a single protein holding a single empty subunit is the *sentinel*,
/// meaning "no gene requirement". It is shared by the [`GprTag::NoGene`],
/// [`GprTag::Spontaneous`] and [`GprTag::Universal`] tags, which differ only in provenance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gpr {
    proteins: BTreeSet<Protein>,
    tag: GprTag,
    /// Cached flattening of `proteins`
    features: BTreeSet<String>,
}

impl Gpr {
    // region Creation Functions
    /// Create a new GPR from a set of proteins
    ///
    /// An empty set of proteins results in the [`GprTag::NoGene`] sentinel, regardless of the
    /// provided `tag`.
    ///
    /// # Errors
    /// Returns [`GprError::RepresentationInvariant`] if the proteins contain an empty protein or
    /// empty subunit (outside the sentinel), or if `tag` doesn't agree with the structure.
    ///
    /// # Examples
    /// ```rust
    /// use gprmerge_core::metabolic_model::gpr::{Gpr, GprTag, Protein, Subunit};
    /// let gpr = Gpr::from_proteins(
    ///     [Protein::new([Subunit::new(["b0001", "b0002"]), Subunit::new(["b0003"])])],
    ///     GprTag::Genes,
    /// )
    /// .unwrap();
    /// assert_eq!(gpr.to_string(), "(((b0001 or b0002) and (b0003)))");
    /// ```
    pub fn from_proteins<I: IntoIterator<Item = Protein>>(
        proteins: I,
        tag: GprTag,
    ) -> Result<Gpr, GprError> {
        let proteins: BTreeSet<Protein> = proteins.into_iter().collect();
        if proteins.is_empty() {
            return Ok(Gpr::no_gene());
        }
        let features = flatten(&proteins);
        let gpr = Gpr {
            proteins,
            tag,
            features,
        };
        gpr.check_rep()?;
        Ok(gpr)
    }

    /// The sentinel GPR for a reaction without gene associations
    pub fn no_gene() -> Gpr {
        Gpr::sentinel(GprTag::NoGene)
    }

    /// The sentinel GPR for a spontaneous reaction
    pub fn spontaneous() -> Gpr {
        Gpr::sentinel(GprTag::Spontaneous)
    }

    /// The sentinel GPR for a universal reaction
    pub fn universal() -> Gpr {
        Gpr::sentinel(GprTag::Universal)
    }

    /// Only called with tags for which [`GprTag::is_sentinel`] holds
    pub(crate) fn sentinel(tag: GprTag) -> Gpr {
        Gpr {
            proteins: sentinel_proteins(),
            tag,
            features: BTreeSet::new(),
        }
    }
    // endregion Creation Functions

    // region Accessors
    pub fn tag(&self) -> GprTag {
        self.tag
    }

    /// The alternative protein complexes, any one of which can catalyze the reaction
    pub fn proteins(&self) -> &BTreeSet<Protein> {
        &self.proteins
    }

    /// Every feature referenced anywhere in the GPR
    pub fn features(&self) -> &BTreeSet<String> {
        &self.features
    }

    /// Whether the GPR references no features at all
    ///
    /// # Note
    /// Spontaneous and universal reactions are also empty, but they should be considered
    /// always active rather than lacking evidence, check [`Gpr::tag`] as well.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Whether the GPR has the sentinel structure (a single protein with a single, empty,
    /// subunit)
    pub fn is_sentinel(&self) -> bool {
        is_sentinel_structure(&self.proteins)
    }
    // endregion Accessors

    // region Queries
    pub fn contains_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    pub fn contains_protein(&self, protein: &Protein) -> bool {
        self.proteins.contains(protein)
    }

    /// Check whether any protein in the GPR contains `subunit`
    pub fn contains_subunit(&self, subunit: &Subunit) -> bool {
        self.proteins
            .iter()
            .any(|protein| protein.contains_subunit(subunit))
    }

    /// Generate the canonical GPR string, e.g. `"((a or b) and (c)) or ((d))"` wrapped in an
    /// outer pair of parentheses
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Generate the GPR string without the outer parentheses, the form expected by modeling
    /// services when updating a reaction's rule
    pub fn to_rule_string(&self) -> String {
        let rendered = self.render();
        rendered
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
            .map(str::to_string)
            .unwrap_or(rendered)
    }

    /// Hexadecimal hash of the structure and tag
    ///
    /// Identical GPRs always produce identical fingerprints, independent of the order
    /// in which their features were collected.
    pub fn fingerprint(&self) -> String {
        hash_as_hex_string(&(&self.proteins, self.tag))
    }
    // endregion Queries

    /// Check the representation invariant
    ///
    /// - The cached feature set equals the flattening of the proteins
    /// - The GPR has at least one protein
    /// - Outside the sentinel, no protein or subunit is empty
    /// - The sentinel tags are carried by, and only by, the sentinel structure
    pub(crate) fn check_rep(&self) -> Result<(), GprError> {
        if self.features != flatten(&self.proteins) {
            return Err(GprError::RepresentationInvariant(format!(
                "cached feature set does not match the features of {}",
                self
            )));
        }
        if self.proteins.is_empty() {
            return Err(GprError::RepresentationInvariant(
                "GPR has no proteins".to_string(),
            ));
        }
        let sentinel = is_sentinel_structure(&self.proteins);
        if !sentinel
            && self
                .proteins
                .iter()
                .any(|p| p.is_empty() || p.subunits.iter().any(Subunit::is_empty))
        {
            return Err(GprError::RepresentationInvariant(format!(
                "{} contains an empty protein or subunit",
                self
            )));
        }
        if sentinel != self.tag.is_sentinel() {
            return Err(GprError::RepresentationInvariant(format!(
                "tag `{}` is inconsistent with the structure of {}",
                self.tag, self
            )));
        }
        Ok(())
    }
}

impl Display for Gpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let proteins: Vec<String> = self.proteins.iter().map(Protein::to_string).collect();
        write!(f, "({})", proteins.join(" or "))
    }
}

fn sentinel_proteins() -> BTreeSet<Protein> {
    BTreeSet::from([Protein::new([Subunit::default()])])
}

fn is_sentinel_structure(proteins: &BTreeSet<Protein>) -> bool {
    proteins.len() == 1
        && proteins
            .iter()
            .all(|p| p.len() == 1 && p.subunits.iter().all(Subunit::is_empty))
}

/// Collect every feature of every subunit of every protein
pub(crate) fn flatten<'a, I>(proteins: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Protein>,
{
    proteins
        .into_iter()
        .flat_map(|protein| protein.subunits.iter())
        .flat_map(|subunit| subunit.features.iter().cloned())
        .collect()
}
// endregion Gpr

/// Errors which can occur while building or combining GPRs
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GprError {
    /// An input reaction protein record was missing required data, the reaction can be
    /// skipped by the caller
    #[error("Malformed reaction protein record: {0}")]
    MalformedRecord(String),
    /// The internal representation of a GPR is inconsistent, indicating a logic error
    #[error("GPR representation invariant violated: {0}")]
    RepresentationInvariant(String),
}
