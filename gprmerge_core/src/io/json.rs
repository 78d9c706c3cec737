//! Module providing JSON conversion of the reaction records of a Model
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metabolic_model::builder::ReactionProtein;
use crate::metabolic_model::gpr::GprError;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::ModelReaction;

// region JSON Model
/// Represents a JSON serialized model, only the reaction records are used
#[derive(Serialize, Deserialize)]
struct JsonModel {
    id: Option<String>,
    #[serde(rename = "modelreactions", default)]
    reactions: Vec<JsonReaction>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    #[serde(rename = "modelReactionProteins", default)]
    proteins: Vec<ReactionProtein>,
}
// endregion JSON Model

// region Conversions
impl TryFrom<JsonReaction> for ModelReaction {
    type Error = GprError;

    fn try_from(r: JsonReaction) -> Result<Self, Self::Error> {
        ModelReaction::from_protein_records(&r.id, r.name, &r.proteins)
    }
}

impl From<&ModelReaction> for JsonReaction {
    fn from(r: &ModelReaction) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            proteins: r.gpr.to_protein_records(),
        }
    }
}

impl Model {
    /// Read a model from a JSON string holding its `modelreactions`
    ///
    /// # Errors
    /// Fails if the JSON can't be parsed, or if any reaction has a malformed protein record.
    /// Use [`Model::from_json_str_skipping_malformed`] to skip such reactions instead.
    pub fn from_json_str(json: &str) -> Result<Model, JsonError> {
        let json_model: JsonModel = serde_json::from_str(json)?;
        let mut reactions: IndexMap<String, ModelReaction> = IndexMap::new();
        for rxn in json_model.reactions {
            let id = rxn.id.clone();
            let reaction = ModelReaction::try_from(rxn)
                .map_err(|source| JsonError::InvalidReaction { id: id.clone(), source })?;
            reactions.insert(id, reaction);
        }
        Ok(Model {
            id: json_model.id,
            reactions,
        })
    }

    /// Read a model from a JSON string, skipping reactions with malformed protein records
    ///
    /// Returns the model along with the ids of the skipped reactions.
    pub fn from_json_str_skipping_malformed(json: &str) -> Result<(Model, Vec<String>), JsonError> {
        let json_model: JsonModel = serde_json::from_str(json)?;
        let mut reactions: IndexMap<String, ModelReaction> = IndexMap::new();
        let mut skipped: Vec<String> = Vec::new();
        for rxn in json_model.reactions {
            let id = rxn.id.clone();
            match ModelReaction::try_from(rxn) {
                Ok(reaction) => {
                    reactions.insert(id, reaction);
                }
                Err(GprError::MalformedRecord(reason)) => {
                    debug!("skipping reaction {}: {}", id, reason);
                    skipped.push(id);
                }
                Err(err) => return Err(JsonError::InvalidReaction { id, source: err }),
            }
        }
        Ok((
            Model {
                id: json_model.id,
                reactions,
            },
            skipped,
        ))
    }

    /// Write the model's reactions as a JSON string
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        let json_model = JsonModel {
            id: self.id.clone(),
            reactions: self.reactions.values().map(JsonReaction::from).collect(),
        };
        Ok(serde_json::to_string(&json_model)?)
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to build the GPR of reaction {id}")]
    InvalidReaction {
        id: String,
        #[source]
        source: GprError,
    },
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
}
// endregion Conversions
