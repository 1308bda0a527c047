pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod nlu;
pub mod rulebased;
pub mod rules;
pub mod state;
pub mod strategy;
pub mod templates;

pub use config::{Config, PersuadeTechnique};
pub use error::PolicyError;
pub use evaluator::{Criterion, Evaluator};
pub use rulebased::RuleBased;
pub use state::{DialogueState, MyAction, Settlement, TheirIntent};
pub use strategy::{ItemRanking, Strategy, Thresholds};
