use std::io::Cursor;

use crate::alphabet::{ALNUM, ALPHA, DIGIT, HEX_DIGIT};
use crate::{simulate, ByteStream, Graph, RangeUInt, Simulation};

fn run(graph: &Graph, input: &str) -> (Simulation, u64) {
    let mut stream = Cursor::new(input.as_bytes());
    let result = simulate(graph, &mut stream).expect("in-memory stream cannot fail");
    let offset = stream.offset().expect("in-memory stream cannot fail");
    (result, offset)
}

// expected: length of the longest accepted prefix, None if nothing is accepted
fn run_vectors(tests: &[(&str, Option<usize>)], graph: &Graph) {
    for (test, expected) in tests {
        let (result, offset) = run(graph, test);
        let actual = match result {
            Simulation::Matched(len) => Some(len),
            Simulation::Rejected(_) => None,
        };
        assert_eq!(
            actual,
            *expected,
            "'{}' failed on input '{}', expected match: {:?}, actual match: {:?}",
            graph.name(),
            test,
            expected,
            actual
        );
        assert_eq!(
            offset,
            expected.unwrap_or(0) as u64,
            "'{}' left the stream at the wrong offset on input '{}'",
            graph.name(),
            test
        );
    }
}

#[test]
fn basic() {
    // a(b|c)*
    let graph = Graph::symbol(b"a").concat(Graph::union(Graph::symbol(b"b"), Graph::symbol(b"c")).star());

    let test_vectors = vec![
        ("a", Some(1)),
        ("b", None),
        ("x", None),
        ("ab", Some(2)),
        ("ac", Some(2)),
        ("abcbc", Some(5)),
        ("acbcb", Some(5)),
        ("bcbc", None),
        ("abbbbbbbbbb", Some(11)),
        ("abx", Some(2)),
    ];

    run_vectors(&test_vectors, &graph)
}

#[test]
fn string_stops_after_literal() {
    for literal in ["->", "<<=", "while", "x"] {
        let graph = Graph::string(literal);
        let input = format!("{literal}@");
        let (result, offset) = run(&graph, &input);
        assert_eq!(result, Simulation::Matched(literal.len()));
        assert_eq!(offset, literal.len() as u64);
    }
}

#[test]
fn string_rejects_partial_literal() {
    let graph = Graph::string("<<=");
    let (result, offset) = run(&graph, "<<x");
    assert_eq!(result, Simulation::Rejected(3));
    assert_eq!(result.signed(), -3);
    assert_eq!(offset, 0);
}

#[test]
fn kleene_star_run_lengths() {
    let graph = Graph::symbol(b"a").star();

    let test_vectors = vec![("", Some(0)), ("a", Some(1)), ("aaaa", Some(4)), ("b", Some(0)), ("aab", Some(2))];

    run_vectors(&test_vectors, &graph)
}

#[test]
fn longest_prefix_wins() {
    let graph = Graph::symbol(ALNUM).star();
    let (result, offset) = run(&graph, "abc123 ");
    assert_eq!(result, Simulation::Matched(6));
    assert_eq!(offset, 6);
}

#[test]
fn match_survives_failed_extension() {
    // ab(cd)* on "abcdc": the trailing c is examined but the match stays at 4
    let graph = Graph::string("ab").concat(Graph::string("cd").star());
    let (result, offset) = run(&graph, "abcdcx");
    assert_eq!(result, Simulation::Matched(4));
    assert_eq!(offset, 4);
}

#[test]
fn epsilon_and_never() {
    assert_eq!(run(&Graph::epsilon(), "abc"), (Simulation::Matched(0), 0));
    assert_eq!(run(&Graph::epsilon(), ""), (Simulation::Matched(0), 0));
    assert_eq!(run(&Graph::never(), "abc"), (Simulation::Rejected(1), 0));
    assert_eq!(run(&Graph::never(), ""), (Simulation::Rejected(0), 0));
}

#[test]
fn anybut_excludes_listed_bytes() {
    let graph = Graph::anybut(b"\"\\\n").plus();

    let test_vectors = vec![("abc\"", Some(3)), ("\"", None), ("a\\", Some(1)), ("x\ny", Some(1))];

    run_vectors(&test_vectors, &graph)
}

#[test]
fn keyword_requires_word_boundaries() {
    let graph = Graph::keyword("if");

    let test_vectors = vec![
        ("if", Some(2)),
        ("if(x)", Some(2)),
        ("if x", Some(2)),
        ("ifx", None),
        ("if_", None),
        ("if1", None),
        ("i", None),
    ];

    run_vectors(&test_vectors, &graph)
}

#[test]
fn keyword_checks_byte_before_start() {
    let graph = Graph::keyword("if");

    // starting in the middle of an identifier is not a word start
    let mut stream = Cursor::new(&b"xif"[..]);
    stream.seek_to(1).unwrap();
    assert!(simulate(&graph, &mut stream).unwrap().consumed().is_none());
    assert_eq!(stream.offset().unwrap(), 1);

    let mut stream = Cursor::new(&b"(if)"[..]);
    stream.seek_to(1).unwrap();
    assert_eq!(simulate(&graph, &mut stream).unwrap(), Simulation::Matched(2));
    assert_eq!(stream.offset().unwrap(), 3);
}

#[test]
fn word_boundary_at_buffer_edges() {
    let graph = Graph::word_boundary();

    // start of input followed by a word byte, and a word byte followed by end of input
    assert_eq!(run(&graph, "a"), (Simulation::Matched(0), 0));
    let mut stream = Cursor::new(&b"a"[..]);
    stream.seek_to(1).unwrap();
    assert_eq!(simulate(&graph, &mut stream).unwrap(), Simulation::Matched(0));

    // no word on either side
    assert_eq!(run(&graph, " "), (Simulation::Rejected(1), 0));
    assert_eq!(run(&graph, ""), (Simulation::Rejected(0), 0));
}

#[test]
fn identifier_pattern() {
    let graph = Graph::symbol(ALPHA).concat(Graph::symbol(ALNUM).star());

    let test_vectors = vec![("x", Some(1)), ("_tmp1 =", Some(5)), ("1abc", None), ("ifx(", Some(3))];

    run_vectors(&test_vectors, &graph)
}

#[test]
fn bounded_repetition() {
    let octal = Graph::symbol(b"01234567").repeat(1, RangeUInt::Finite(3));
    let test_vectors = vec![("7", Some(1)), ("12", Some(2)), ("777", Some(3)), ("7777", Some(3)), ("8", None)];
    run_vectors(&test_vectors, &octal);

    let hex_quad = Graph::symbol(HEX_DIGIT).repeat(4, RangeUInt::Finite(4));
    let test_vectors = vec![("beef", Some(4)), ("bee", None), ("00ff00", Some(4))];
    run_vectors(&test_vectors, &hex_quad);

    let at_least_two = Graph::symbol(DIGIT).repeat(2, RangeUInt::Infinite);
    let test_vectors = vec![("1", None), ("12", Some(2)), ("12345x", Some(5))];
    run_vectors(&test_vectors, &at_least_two);

    let optional = Graph::symbol(b"-").repeat(0, RangeUInt::Finite(1));
    let test_vectors = vec![("-", Some(1)), ("+", Some(0))];
    run_vectors(&test_vectors, &optional);
}

#[test]
fn graphs_are_reusable_after_simulation() {
    let graph = Graph::symbol(DIGIT).plus();
    for _ in 0..3 {
        assert_eq!(run(&graph, "42;").0, Simulation::Matched(2));
    }
}

#[test]
fn simulation_starts_at_current_offset() {
    let graph = Graph::symbol(DIGIT).plus();
    let mut stream = Cursor::new(&b"ab123c"[..]);
    stream.seek_to(2).unwrap();
    assert_eq!(simulate(&graph, &mut stream).unwrap(), Simulation::Matched(3));
    assert_eq!(stream.offset().unwrap(), 5);
}
