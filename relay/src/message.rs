use crate::{PathPayload, UserId};
use serde::{Deserialize, Serialize};

/// Events a client sends over its channel. Tags and field names follow the
/// wire protocol of the web clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    StartSession {
        #[serde(rename = "presenterId")]
        presenter_id: UserId,
    },
    Draw {
        #[serde(rename = "presenterId")]
        presenter_id: UserId,
        path: PathPayload,
    },
    EndSession {
        #[serde(rename = "presenterId")]
        presenter_id: UserId,
    },
    Join {
        #[serde(rename = "presenterId")]
        presenter_id: UserId,
    },
    Leave {
        #[serde(rename = "presenterId")]
        presenter_id: UserId,
    },
}

/// Events the relay pushes to clients. Only current viewers of a presenter's
/// session receive its strokes, never the presenter itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    DrawPath { path: PathPayload },
}
