use std::io;

use log::trace;

use crate::frontier::StateList;
use crate::graph::{Context, Graph};
use crate::stream::ByteStream;

/// Outcome of running one automaton at the current stream position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Simulation {
    /// Longest accepted prefix. May be zero for automata that accept the empty string.
    Matched(usize),
    /// No accepted prefix; carries how many bytes were examined before giving up.
    Rejected(usize),
}

impl Simulation {
    // classic encoding: match length, or minus the number of bytes examined
    pub fn signed(self) -> i64 {
        match self {
            Simulation::Matched(len) => len as i64,
            Simulation::Rejected(examined) => -(examined as i64),
        }
    }

    // a match that actually consumed input
    pub fn consumed(self) -> Option<usize> {
        match self {
            Simulation::Matched(len) if len > 0 => Some(len),
            _ => None,
        }
    }
}

/// Find the longest prefix of the remaining input accepted by `graph`.
///
/// On a match the stream is left just past the matched prefix. Otherwise it is put back at the
/// offset it started from.
///
/// Word-boundary assertions need the bytes on both sides of a position, so the byte before the
/// start offset is read first and one byte of lookahead is kept while stepping.
pub fn simulate<S: ByteStream + ?Sized>(graph: &Graph, stream: &mut S) -> io::Result<Simulation> {
    let start = stream.offset()?;
    let prev = if start > 0 {
        stream.seek_relative(-1)?;
        stream.read_byte()?
    } else {
        None
    };
    let mut lookahead = stream.read_byte()?;

    let mut current = StateList::with_capacity(graph.len());
    let mut next = StateList::with_capacity(graph.len());
    current.push_closure(
        graph,
        graph.initial(),
        Context {
            prev,
            next: lookahead,
        },
    );

    let mut best = current.contains(graph.accept()).then_some(0);
    let mut count = 0;

    while let Some(byte) = lookahead {
        count += 1;
        lookahead = stream.read_byte()?;
        let ctx = Context {
            prev: Some(byte),
            next: lookahead,
        };

        for state in current.iter() {
            next.push_matching(graph, state, byte, ctx);
        }
        trace!(
            "{}: '{}' -> {} states",
            graph.name(),
            byte.escape_ascii(),
            next.len()
        );

        if next.is_empty() {
            break;
        }

        if next.contains(graph.accept()) {
            best = Some(count);
        }

        current.clear();
        std::mem::swap(&mut current, &mut next);
    }

    match best {
        Some(len) => {
            stream.seek_to(start + len as u64)?;
            Ok(Simulation::Matched(len))
        }
        None => {
            stream.seek_to(start)?;
            Ok(Simulation::Rejected(count))
        }
    }
}
