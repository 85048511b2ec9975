use mort_util::{make_type_idx, RangeUInt};

use crate::alphabet::{is_word_byte, ByteClass};

/// Zero-width predicates a transition can be guarded by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assertion {
    WordBoundary,
}

/// Bytes on either side of the position a closure is being computed at.
/// `None` means the edge of the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Context {
    pub prev: Option<u8>,
    pub next: Option<u8>,
}

impl Assertion {
    pub fn holds(self, ctx: Context) -> bool {
        match self {
            Assertion::WordBoundary => {
                let before = ctx.prev.is_some_and(is_word_byte);
                let after = ctx.next.is_some_and(is_word_byte);
                before != after
            }
        }
    }
}

#[derive(Clone, Debug)]
pub enum Edge {
    Epsilon,
    Bytes(ByteClass),
    Assert(Assertion),
}

#[derive(Clone, Debug)]
pub struct Transition {
    pub edge: Edge,
    pub target: StateIdx,
}

// thompson construction never needs more than two out-edges
#[derive(Clone, Debug, Default)]
pub struct State {
    out: [Option<Transition>; 2],
}

make_type_idx!(pub StateIdx, State);

impl State {
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.out.iter().flatten()
    }

    fn connect(&mut self, edge: Edge, target: StateIdx) {
        let slot = self
            .out
            .iter_mut()
            .find(|slot| slot.is_none())
            .expect("state already has two out-edges");
        *slot = Some(Transition { edge, target });
    }
}

/// A Thompson NFA with one initial and one accepting state.
///
/// The graph owns every state in its arena. Composition (`union`, `concat`, `star`) consumes
/// the operands and moves their states into the result, so a composed-away subgraph can not be
/// used again. Cycles introduced by `star` are plain back-edges between indices.
///
/// Invariant: the accepting state has no out-edges until the graph is composed into a larger one.
#[derive(Clone, Debug)]
pub struct Graph {
    states: Vec<State>,
    initial: StateIdx,
    accept: StateIdx,
    name: String,
}

impl Graph {
    // two states joined by a single edge
    fn edge_pair(edge: Edge, name: String) -> Graph {
        let mut states = Vec::new();
        let accept = StateIdx::from_push(&mut states, State::default());
        let initial = StateIdx::from_push(&mut states, State::default());
        states[initial].connect(edge, accept);

        Graph {
            states,
            initial,
            accept,
            name,
        }
    }

    pub fn symbol(valid: impl Into<ByteClass>) -> Graph {
        let class = valid.into();
        let name = format!("[{}]", class.label());
        Self::edge_pair(Edge::Bytes(class), name)
    }

    pub fn anybut(invalid: &[u8]) -> Graph {
        Self::symbol(ByteClass::any_but(invalid))
    }

    pub fn string(literal: impl AsRef<[u8]>) -> Graph {
        let literal = literal.as_ref();
        let mut states = Vec::new();
        let initial = StateIdx::from_push(&mut states, State::default());

        let mut tail = initial;
        for byte in literal {
            let new = StateIdx::from_push(&mut states, State::default());
            states[tail].connect(Edge::Bytes(ByteClass::of(&[*byte])), new);
            tail = new;
        }

        Graph {
            states,
            initial,
            accept: tail,
            name: literal.escape_ascii().to_string(),
        }
    }

    pub fn epsilon() -> Graph {
        Self::edge_pair(Edge::Epsilon, "ε".to_string())
    }

    pub fn never() -> Graph {
        Self::edge_pair(Edge::Bytes(ByteClass::empty()), "∅".to_string())
    }

    pub fn word_boundary() -> Graph {
        Self::edge_pair(Edge::Assert(Assertion::WordBoundary), "\\b".to_string())
    }

    // move another graph's arena onto the end of this one, returning its rebased endpoints
    fn absorb(&mut self, other: Graph) -> (StateIdx, StateIdx, String) {
        let offset = self.states.len();
        let Graph {
            states,
            initial,
            accept,
            name,
        } = other;

        self.states.extend(states.into_iter().map(|mut state| {
            for transition in state.out.iter_mut().flatten() {
                transition.target = transition.target.rebase(offset);
            }
            state
        }));

        (initial.rebase(offset), accept.rebase(offset), name)
    }

    pub fn union(s: Graph, t: Graph) -> Graph {
        let mut graph = s;
        let (s_initial, s_accept) = (graph.initial, graph.accept);
        let (t_initial, t_accept, t_name) = graph.absorb(t);

        let accept = StateIdx::from_push(&mut graph.states, State::default());
        let initial = StateIdx::from_push(&mut graph.states, State::default());
        graph.states[initial].connect(Edge::Epsilon, s_initial);
        graph.states[initial].connect(Edge::Epsilon, t_initial);
        graph.states[s_accept].connect(Edge::Epsilon, accept);
        graph.states[t_accept].connect(Edge::Epsilon, accept);

        graph.name = format!("({}|{})", graph.name, t_name);
        graph.initial = initial;
        graph.accept = accept;
        graph
    }

    pub fn concat(mut self, t: Graph) -> Graph {
        let (t_initial, t_accept, t_name) = self.absorb(t);
        self.states[self.accept].connect(Edge::Epsilon, t_initial);

        self.name.push_str(&t_name);
        self.accept = t_accept;
        self
    }

    pub fn star(mut self) -> Graph {
        let (inner_initial, inner_accept) = (self.initial, self.accept);

        let accept = StateIdx::from_push(&mut self.states, State::default());
        self.states[inner_accept].connect(Edge::Epsilon, inner_initial);
        self.states[inner_accept].connect(Edge::Epsilon, accept);

        let initial = StateIdx::from_push(&mut self.states, State::default());
        self.states[initial].connect(Edge::Epsilon, inner_initial);
        self.states[initial].connect(Edge::Epsilon, accept);

        self.name = format!("({})*", self.name);
        self.initial = initial;
        self.accept = accept;
        self
    }

    // one or more
    pub fn plus(self) -> Graph {
        self.clone().concat(self.star())
    }

    // `count` back-to-back copies, count must be nonzero
    fn copies(&self, count: u32) -> Graph {
        assert!(count > 0, "copies requires a nonzero count");
        (1..count).fold(self.clone(), |acc, _| acc.concat(self.clone()))
    }

    /// Bounded repetition, desugared the same way a regex `{low,high}` count is:
    /// an alternation of every admissible fixed count, or `low` copies followed by a star
    /// when the upper bound is open.
    pub fn repeat(self, low: u32, high: RangeUInt) -> Graph {
        assert!(high.admits(low), "repetition bounds out of order");
        match high {
            RangeUInt::Finite(high) if low == 1 && high == 1 => self,
            RangeUInt::Finite(high) => {
                let mut alternates = (low..=high).map(|i| {
                    if i == 0 {
                        Graph::epsilon()
                    } else {
                        self.copies(i)
                    }
                });
                let first = alternates.next().expect("range is nonempty");
                alternates.fold(first, Graph::union)
            }
            RangeUInt::Infinite if low == 0 => self.star(),
            RangeUInt::Infinite => self.copies(low).concat(self.star()),
        }
    }

    /// A literal that only matches as a whole word, so `if` does not match the front of `ifx`.
    pub fn keyword(literal: &str) -> Graph {
        Graph::word_boundary().concat(Graph::string(literal).concat(Graph::word_boundary()))
    }

    pub fn initial(&self) -> StateIdx {
        self.initial
    }

    pub fn accept(&self) -> StateIdx {
        self.accept
    }

    pub fn state(&self, idx: StateIdx) -> &State {
        &self.states[idx]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
