use mort_nfa::Graph;

use super::lexemes::LexemeSet;

#[derive(Debug, Clone)]
pub struct TokenDefinition<T> {
    kind: T,
    pattern: Graph,
}

impl<T: Copy> TokenDefinition<T> {
    pub fn new(kind: T, pattern: Graph) -> Self {
        Self { kind, pattern }
    }

    pub fn kind(&self) -> T {
        self.kind
    }

    pub fn pattern(&self) -> &Graph {
        &self.pattern
    }
}

/// Ordered (kind, automaton) pairs. Position in the table is match priority: the scanner
/// commits to the first definition that matches, even if a later one would match more.
///
/// Built once before scanning and only ever read afterwards.
#[derive(Debug, Clone)]
pub struct DefinitionTable<T> {
    definitions: Vec<TokenDefinition<T>>,
}

impl<T: LexemeSet> DefinitionTable<T> {
    // compile every lexeme of the set, in declaration order
    pub fn from_lexeme_set() -> Self {
        let definitions = T::iter()
            .map(|kind| TokenDefinition::new(kind, kind.pattern()))
            .collect();
        Self::new(definitions)
    }
}

impl<T: Copy> DefinitionTable<T> {
    pub fn new(definitions: Vec<TokenDefinition<T>>) -> Self {
        Self { definitions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenDefinition<T>> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
