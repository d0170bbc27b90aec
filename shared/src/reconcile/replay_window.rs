use crate::Tick;

/// Progress of the reconciliation currently in flight. Every field is unset
/// between cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayWindow {
    client_state_tick: Option<Tick>,
    server_state_tick: Option<Tick>,
    client_replay_tick: Option<Tick>,
    server_replay_tick: Option<Tick>,
    is_reconciling: bool,
}

impl ReplayWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a cycle for the state applied after `client_tick`
    pub(crate) fn begin(&mut self, client_tick: Tick, server_tick: Tick) {
        self.is_reconciling = true;
        self.client_state_tick = Some(client_tick);
        self.server_state_tick = Some(server_tick);
    }

    /// Positions the replay cursor on the first tick after the applied state.
    ///
    /// Server ticks wrap the same way the replay loop advances them. A state
    /// at the last client tick has nothing after it to replay.
    pub(crate) fn start_replay(&mut self) -> Option<(Tick, Tick)> {
        let client = self.client_state_tick?.checked_add(1)?;
        let server = self.server_state_tick?.wrapping_add(1);
        self.client_replay_tick = Some(client);
        self.server_replay_tick = Some(server);
        Some((client, server))
    }

    pub(crate) fn set_replay_ticks(&mut self, client_tick: Tick, server_tick: Tick) {
        self.client_replay_tick = Some(client_tick);
        self.server_replay_tick = Some(server_tick);
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_reconciling(&self) -> bool {
        self.is_reconciling
    }

    pub fn client_state_tick(&self) -> Option<Tick> {
        self.client_state_tick
    }

    pub fn server_state_tick(&self) -> Option<Tick> {
        self.server_state_tick
    }

    pub fn client_replay_tick(&self) -> Option<Tick> {
        self.client_replay_tick
    }

    pub fn server_replay_tick(&self) -> Option<Tick> {
        self.server_replay_tick
    }
}
