use actix::Message;
use common::errors::LocationError;

/// Notices rendered by the `UIHandler` outside the two search paths.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub enum UIMessage {
    ShowMessage(String),
    LocationFailed(LocationError),
}
