use bit_set::BitSet;

use crate::graph::{Context, Edge, Graph, StateIdx};

/// The set of states the automaton could be in at one input position.
///
/// Membership is by state index. Insertion order is kept so traces come out the same on every
/// run; it has no bearing on the result.
#[derive(Debug, Default)]
pub struct StateList {
    states: Vec<StateIdx>,
    members: BitSet,
}

impl StateList {
    pub fn new() -> StateList {
        Self::default()
    }

    pub fn with_capacity(nstates: usize) -> StateList {
        StateList {
            states: Vec::with_capacity(nstates),
            members: BitSet::with_capacity(nstates),
        }
    }

    // returns false if the state was already present
    pub fn push(&mut self, state: StateIdx) -> bool {
        if !self.members.insert(state.index()) {
            return false;
        }
        self.states.push(state);
        true
    }

    pub fn contains(&self, state: StateIdx) -> bool {
        self.members.contains(state.index())
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StateIdx> + '_ {
        self.states.iter().copied()
    }

    /// Push `state` and everything reachable from it without consuming input.
    ///
    /// Zero-width assertions are followed when they hold for `ctx`. States already in the list
    /// are not revisited, which is what stops the walk on the back-edge of a star.
    pub fn push_closure(&mut self, graph: &Graph, state: StateIdx, ctx: Context) {
        let mut stack = vec![state];
        while let Some(idx) = stack.pop() {
            if !self.push(idx) {
                continue;
            }

            // reversed so the first out-edge is expanded first
            let mut pending: Vec<StateIdx> = graph
                .state(idx)
                .transitions()
                .filter(|t| match &t.edge {
                    Edge::Epsilon => true,
                    Edge::Assert(assertion) => assertion.holds(ctx),
                    Edge::Bytes(_) => false,
                })
                .map(|t| t.target)
                .filter(|target| !self.contains(*target))
                .collect();
            pending.reverse();
            stack.extend(pending);
        }
    }

    /// Push the closure of every state reached from `state` by consuming `byte`.
    pub fn push_matching(&mut self, graph: &Graph, state: StateIdx, byte: u8, ctx: Context) {
        for transition in graph.state(state).transitions() {
            if let Edge::Bytes(class) = &transition.edge {
                if class.contains(byte) && !self.contains(transition.target) {
                    self.push_closure(graph, transition.target, ctx);
                }
            }
        }
    }
}
