//! Bot record

use serde::Serialize;

/// One bot in the roster
#[derive(Debug, Clone, Serialize)]
pub struct Bot {
    /// Bot name; doubles as its frame stream id
    pub name: String,

    /// Local IP the bot reported from
    pub local_ip: String,

    /// Last reported temperature
    pub temperature: i32,

    /// Map the bot is currently gathering on
    pub gathering_map: String,

    /// Registration order (monotonic; survives status updates)
    #[serde(skip)]
    pub(crate) seq: u64,
}

impl Bot {
    pub(crate) fn new(
        name: String,
        local_ip: String,
        temperature: i32,
        gathering_map: String,
        seq: u64,
    ) -> Self {
        Self {
            name,
            local_ip,
            temperature,
            gathering_map,
            seq,
        }
    }
}
