pub mod error;
mod framework;
mod negotiation_record;
mod tokenizer;
mod tracker;
mod workdir;

pub use framework::{Framework, ScriptedTurn};
pub use negotiation_record::{NegotiationRecord, NegotiationStage};
pub use tokenizer::SimpleTokenizer;
pub use tracker::{Analysis, ScriptedTracker, TrackerScript};
pub use workdir::prepare_test_dir;
