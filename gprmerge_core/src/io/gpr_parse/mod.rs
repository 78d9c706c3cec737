//! Module for parsing Gene Protein Reaction strings into [`Gpr`] values

use std::collections::BTreeSet;

use crate::io::gpr_parse::lexer::LexerError;
use crate::io::gpr_parse::parser::{GprRule, ParseError};
use crate::metabolic_model::gpr::{Gpr, GprError, GprTag, Protein, Subunit};
use thiserror::Error;

mod lexer;
pub mod parser;
mod token;

/// Parse a Gene Protein Reaction string into a GPR
///
/// The rule is normalized into a set of alternative protein complexes. A disjunction of
/// genes used as an operand of `and` becomes a single subunit, any other disjunction becomes
/// separate proteins, and conjunctions combine the subunits of their operands.
/// Parsing a rendered GPR gives back an equivalent rule, though not always the same
/// structure, since grouping parentheses are not significant.
///
/// # Parameters
/// - `input`: &str representing the gene protein reaction rule
///
/// # Returns
/// Parse result which is
/// - `Ok`: The GPR, tagged [`GprTag::Genes`]
/// - `Err`: Returns the GprParseError describing the issue with the GPR rule which
///     was being parsed.
///
/// # Examples
/// ```rust
/// use gprmerge_core::io::gpr_parse::parse_gpr;
/// let gpr = parse_gpr("(Rv0001 or Rv0002) and Rv0003").unwrap();
/// assert_eq!(gpr.to_string(), "(((Rv0001 or Rv0002) and (Rv0003)))");
/// ```
pub fn parse_gpr(input: &str) -> Result<Gpr, GprParseError> {
    // Convert the GPR string into tokens
    let tokens = lexer::Lexer::new(input).lex()?;

    // Now parse those tokens into a GPR tree
    let rule = parser::GprParser::new(tokens).parse()?;
    Ok(Gpr::from_proteins(proteins(&rule), GprTag::Genes)?)
}

/// Alternative proteins described by `rule`
fn proteins(rule: &GprRule) -> BTreeSet<Protein> {
    match rule {
        GprRule::Gene(gene) => BTreeSet::from([Protein::new([Subunit::new([gene.as_str()])])]),
        GprRule::Or(left, right) => {
            let mut alternatives = proteins(left);
            alternatives.extend(proteins(right));
            alternatives
        }
        GprRule::And(left, right) => {
            let left = and_operand(left);
            let right = and_operand(right);
            left.iter()
                .flat_map(|l| {
                    right.iter().map(move |r| {
                        Protein::new(l.subunits().iter().chain(r.subunits()).cloned())
                    })
                })
                .collect()
        }
    }
}

/// Proteins of an operand of `and`, where a plain disjunction of genes is one subunit
fn and_operand(rule: &GprRule) -> BTreeSet<Protein> {
    match gene_disjunction(rule) {
        Some(genes) => BTreeSet::from([Protein::new([Subunit::new(genes)])]),
        None => proteins(rule),
    }
}

/// Genes of `rule` if it only combines genes with `or`
fn gene_disjunction(rule: &GprRule) -> Option<BTreeSet<String>> {
    match rule {
        GprRule::Gene(gene) => Some(BTreeSet::from([gene.clone()])),
        GprRule::Or(left, right) => {
            let mut genes = gene_disjunction(left)?;
            genes.extend(gene_disjunction(right)?);
            Some(genes)
        }
        GprRule::And(_, _) => None,
    }
}

/// Enum representing possible lex and parse errors
#[derive(Debug, Error, PartialEq, Clone)]
pub enum GprParseError {
    /// Lexing Error
    #[error("Error occurred during lexing (conversion of GPR string to tokens)")]
    LexingError(#[from] LexerError),
    /// Parsing Error
    #[error("Error occurred during parsing (conversion of tokens to GPR tree)")]
    ParsingError(#[from] ParseError),
    /// The parsed rule could not be represented
    #[error("Unable to build a GPR from the parsed rule")]
    InvalidGpr(#[from] GprError),
}
