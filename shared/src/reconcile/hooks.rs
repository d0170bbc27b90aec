use crate::{Simulation, Tick};

/// Notification points raised around a reconciliation cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    PreReconcile,
    PostReconcile,
    PreReplay,
    PostReplay,
    PrePhysicsSync,
    PostPhysicsSync,
}

impl HookKind {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        match self {
            HookKind::PreReconcile => 0,
            HookKind::PostReconcile => 1,
            HookKind::PreReplay => 2,
            HookKind::PostReplay => 3,
            HookKind::PrePhysicsSync => 4,
            HookKind::PostPhysicsSync => 5,
        }
    }
}

pub type HookListener = Box<dyn FnMut(Tick, Tick)>;

/// Listeners for each [`HookKind`], invoked synchronously in registration
/// order with `(client_tick, server_tick)`
#[derive(Default)]
pub struct ReconcileHooks {
    listeners: [Vec<HookListener>; HookKind::COUNT],
}

impl ReconcileHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F: FnMut(Tick, Tick) + 'static>(&mut self, kind: HookKind, listener: F) {
        self.listeners[kind.index()].push(Box::new(listener));
    }

    pub fn clear(&mut self, kind: HookKind) {
        self.listeners[kind.index()].clear();
    }

    pub fn listener_count(&self, kind: HookKind) -> usize {
        self.listeners[kind.index()].len()
    }

    pub fn invoke(&mut self, kind: HookKind, client_tick: Tick, server_tick: Tick) {
        for listener in self.listeners[kind.index()].iter_mut() {
            listener(client_tick, server_tick);
        }
    }

    /// Raises `kind` on the simulation, then on every registered listener
    pub fn notify<S: Simulation + ?Sized>(
        &mut self,
        simulation: &mut S,
        kind: HookKind,
        client_tick: Tick,
        server_tick: Tick,
    ) {
        match kind {
            HookKind::PreReconcile => simulation.pre_reconcile(client_tick, server_tick),
            HookKind::PostReconcile => simulation.post_reconcile(client_tick, server_tick),
            HookKind::PreReplay => simulation.pre_replay(client_tick, server_tick),
            HookKind::PostReplay => simulation.post_replay(client_tick, server_tick),
            HookKind::PrePhysicsSync => simulation.pre_physics_sync(client_tick, server_tick),
            HookKind::PostPhysicsSync => simulation.post_physics_sync(client_tick, server_tick),
        }
        self.invoke(kind, client_tick, server_tick);
    }
}
