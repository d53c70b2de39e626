use actix::Message;

/// Message sent to every session actor when the browsing session ends.
///
/// ## Purpose
/// Cancels pending timers, drops session-scoped state and stops the actor.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct EndSession;
