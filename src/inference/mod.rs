//! # Inference
//!
//! Applies a stored model to new molecules. Input molecules are named
//! (unnamed ones become `compound_1`, `compound_2`, ...), checked by the
//! SMILES parser, fingerprinted with the scheme the model was trained on and
//! projected strictly onto the persisted [`FeatureSchema`](crate::features::FeatureSchema).
//! A column the schema needs but the generator did not emit is an error; no
//! predictions are written in that case.

mod error;
mod input;
mod pipeline;


pub use error::InferenceError;
pub use input::{
    name_molecules, parse_input_molecules, read_input_molecules, valid_listing_path, InputMolecule,
    UNNAMED_PREFIX,
};
pub use pipeline::{
    predictions_path, write_predictions_csv, InferencePipeline, Prediction, PredictionReport,
};
