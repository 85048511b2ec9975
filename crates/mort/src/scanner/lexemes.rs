// Expected usage: declare an enum whose variants are all the tokens of a language's microsyntax
// with `lexeme_set!`, in priority order. The scanner tries patterns in declaration order and
// takes the first one that matches, so more specific patterns have to come first.

use std::fmt::Debug;
use std::hash::Hash;

use mort_nfa::Graph;

// 2 representations for each token: enum variant and numeric id (its position in the set)
// Enum variant is canonical, the id is what orders the definition table
pub trait LexemeSet: Clone + Copy + Debug + Eq + Hash {
    fn from_id(id: u32) -> Option<Self>;
    fn to_name(self) -> &'static str;
    fn to_id(self) -> u32;

    fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|x| x.to_name() == name)
    }

    fn next(self) -> Option<Self> {
        Self::from_id(self.to_id() + 1)
    }

    fn iter() -> LexemeIterator<Self> {
        LexemeIterator {
            state: Self::from_id(0),
        }
    }

    // freshly built automaton for this lexeme
    fn pattern(self) -> Graph;
    fn size() -> u32;

    // synthetic kind reported once the input is exhausted
    fn eof() -> Self;
    // whitespace and newlines, dropped by `Scanner::significant`
    fn is_blank(self) -> bool;
    // kinds whose text differs between occurrences (identifiers, literals)
    fn has_variable_content(self) -> bool;
}

pub struct LexemeIterator<T: LexemeSet> {
    state: Option<T>,
}

impl<T: LexemeSet> Iterator for LexemeIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let tmp = self.state;
        self.state = match self.state {
            Some(s) => s.next(),
            None => None,
        };
        tmp
    }
}

/// Declares a token-kind enum and its `LexemeSet` impl from one ordered table.
///
/// ```ignore
/// lexeme_set! {
///     pub enum Tiny {
///         eof: Eof,
///         blank: [Space],
///         variable: [Word],
///         lexemes: {
///             Eof => "eof", Graph::never();
///             Word => "word", Graph::symbol(ALPHA).plus();
///             Space => "space", Graph::symbol(b" ");
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! lexeme_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $set:ident {
            eof: $eof:ident,
            blank: [$($blank:ident),* $(,)?],
            variable: [$($variable:ident),* $(,)?],
            lexemes: {
                $($variant:ident => $name:literal, $pattern:expr;)+
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
        #[repr(u32)]
        $vis enum $set {
            $($variant,)+
        }

        impl $set {
            const ALL: &'static [$set] = &[$($set::$variant,)+];
        }

        impl $crate::scanner::LexemeSet for $set {
            fn from_id(id: u32) -> Option<Self> {
                Self::ALL.get(id as usize).copied()
            }

            fn to_name(self) -> &'static str {
                match self {
                    $($set::$variant => $name,)+
                }
            }

            fn to_id(self) -> u32 {
                self as u32
            }

            fn pattern(self) -> $crate::nfa::Graph {
                match self {
                    $($set::$variant => $pattern,)+
                }
            }

            fn size() -> u32 {
                Self::ALL.len() as u32
            }

            fn eof() -> Self {
                $set::$eof
            }

            fn is_blank(self) -> bool {
                let blank: &[$set] = &[$($set::$blank),*];
                blank.contains(&self)
            }

            fn has_variable_content(self) -> bool {
                let variable: &[$set] = &[$($set::$variable),*];
                variable.contains(&self)
            }
        }
    };
}
