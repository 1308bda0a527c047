use std::path::PathBuf;
use std::sync::Arc;

use barter_negotiator_component::{Event, Offer};
use barter_negotiators::factory::{create_negotiator, AgentConfig};
use barter_negotiators::NegotiatorAddr;

use crate::error::FrameworkError;
use crate::negotiation_record::NegotiationRecord;
use crate::tokenizer::SimpleTokenizer;
use crate::tracker::{Analysis, ScriptedTracker, TrackerScript};
use crate::workdir::{prepare_test_dir, save_record};

/// Single turn of scripted other party together with what offer tracker
/// should find in it.
#[derive(Clone, Debug)]
pub struct ScriptedTurn {
    pub event: Event,
    pub analysis: Analysis,
}

impl ScriptedTurn {
    pub fn says(text: &str) -> ScriptedTurn {
        ScriptedTurn {
            event: Event::Message(text.to_string()),
            analysis: Analysis::default(),
        }
    }

    /// Message with an offer. `keeps` are items the other party wants.
    pub fn offers(text: &str, keeps: Offer) -> ScriptedTurn {
        ScriptedTurn {
            event: Event::Message(text.to_string()),
            analysis: Analysis {
                offer: Some(keeps),
                ..Analysis::default()
            },
        }
    }

    pub fn select() -> ScriptedTurn {
        ScriptedTurn {
            event: Event::Select,
            analysis: Analysis::default(),
        }
    }

    pub fn reject() -> ScriptedTurn {
        ScriptedTurn {
            event: Event::Reject,
            analysis: Analysis::default(),
        }
    }

    pub fn with_lexicon(mut self, words: &[&str]) -> ScriptedTurn {
        self.analysis.lexicon = words.iter().map(|word| word.to_string()).collect();
        self
    }

    pub fn unclear(mut self) -> ScriptedTurn {
        self.analysis.unclear = true;
        self
    }
}

/// Emulates conversation between negotiator under test and scripted
/// other party. Turns alternate until someone selects, rejects or
/// `max_steps` agent turns pass.
pub struct Framework {
    pub agent: Arc<NegotiatorAddr>,
    pub test_dir: PathBuf,
    pub max_steps: usize,

    script: TrackerScript,
    agent_starts: bool,
}

impl Framework {
    pub fn new(test_name: &str, config: AgentConfig) -> anyhow::Result<Framework> {
        let _ = env_logger::builder().is_test(true).try_init();

        let (tracker, script) = ScriptedTracker::new();
        let agent = create_negotiator(config, Box::new(SimpleTokenizer), Box::new(tracker))?;

        Ok(Framework {
            agent,
            test_dir: prepare_test_dir(test_name)?,
            max_steps: 30,
            script,
            agent_starts: true,
        })
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn opponent_starts(mut self) -> Self {
        self.agent_starts = false;
        self
    }

    pub async fn run(&self, turns: Vec<ScriptedTurn>) -> Result<NegotiationRecord, FrameworkError> {
        let mut record = NegotiationRecord::new(self.max_steps);
        let mut turns = turns.into_iter();
        let mut agent_turn = self.agent_starts;

        while !record.is_finished() {
            if agent_turn {
                match self.agent.send().await {
                    Ok(action) => record.agent(action),
                    Err(e) => record.error(&e),
                }
            } else {
                match turns.next() {
                    Some(turn) => {
                        if let Event::Message(_) = &turn.event {
                            self.script.push(turn.analysis);
                        }
                        let result = self.agent.receive(&turn.event).await;
                        record.opponent(turn.event);
                        if let Err(e) = result {
                            record.error(&e);
                        }
                    }
                    None => record.script_ended(),
                }
            }
            agent_turn = !agent_turn;
        }

        log::info!("Negotiation finished:\n{}", record);
        save_record(&self.test_dir, &record).map_err(|e| FrameworkError::from(e, &record))?;
        Ok(record)
    }
}
