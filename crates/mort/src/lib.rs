pub mod scanner;

pub use mort_nfa as nfa;
