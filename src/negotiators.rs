use actix::prelude::*;
use actix::{Actor, Handler};
use anyhow::Result;

use barter_negotiator_component::{Action, DialogueNegotiator, Event};

// =========================================== //
// Negotiator interface
// =========================================== //

/// Other party's turn. Negotiator updates its state, but doesn't answer yet.
#[derive(Message)]
#[rtype(result = "Result<()>")]
pub struct ReceiveEvent {
    pub event: Event,
}

/// It's our turn to speak.
#[derive(Message)]
#[rtype(result = "Result<Action>")]
pub struct SendTurn;

/// Actor hosting single conversation. Messages are processed one at a time,
/// so `receive` and `send` never interleave.
pub struct NegotiatorActor {
    negotiator: Box<dyn DialogueNegotiator>,
    finished: bool,
}

impl NegotiatorActor {
    pub fn new(negotiator: Box<dyn DialogueNegotiator>) -> NegotiatorActor {
        NegotiatorActor {
            negotiator,
            finished: false,
        }
    }
}

impl Actor for NegotiatorActor {
    type Context = Context<Self>;
}

impl Handler<ReceiveEvent> for NegotiatorActor {
    type Result = Result<()>;

    fn handle(&mut self, msg: ReceiveEvent, _: &mut Context<Self>) -> Self::Result {
        log::trace!("Negotiator received: {:?}", msg.event);
        self.negotiator.receive(&msg.event)
    }
}

impl Handler<SendTurn> for NegotiatorActor {
    type Result = Result<Action>;

    fn handle(&mut self, _: SendTurn, ctx: &mut Context<Self>) -> Self::Result {
        if self.finished {
            anyhow::bail!("Conversation already finished.");
        }

        let action = self.negotiator.send()?;
        log::debug!("Negotiator turn: {}", action);

        if action.is_final() {
            self.finished = true;
            ctx.stop();
        }
        Ok(action)
    }
}

#[derive(Clone)]
pub struct NegotiatorAddr {
    pub on_receive: Recipient<ReceiveEvent>,
    pub on_send: Recipient<SendTurn>,
}

impl NegotiatorAddr {
    pub async fn receive(&self, event: &Event) -> Result<()> {
        self.on_receive
            .send(ReceiveEvent {
                event: event.clone(),
            })
            .await?
    }

    pub async fn send(&self) -> Result<Action> {
        self.on_send.send(SendTurn).await?
    }

    pub fn from(negotiator: Box<dyn DialogueNegotiator>) -> NegotiatorAddr {
        let addr = NegotiatorActor::new(negotiator).start();
        NegotiatorAddr {
            on_receive: addr.clone().recipient(),
            on_send: addr.recipient(),
        }
    }
}
