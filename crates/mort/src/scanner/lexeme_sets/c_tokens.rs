use mort_nfa::alphabet::{ALNUM, ALPHA, DIGIT, HEX_DIGIT, NONZERO, OCTAL_DIGIT};
use mort_nfa::{Graph, RangeUInt};

use crate::lexeme_set;

fn octal_digit() -> Graph {
    Graph::symbol(OCTAL_DIGIT)
}

fn hex_digit() -> Graph {
    Graph::symbol(HEX_DIGIT)
}

fn hex_quad() -> Graph {
    hex_digit().repeat(4, RangeUInt::Finite(4))
}

// \ followed by one of: simple escape, octal (1-3 digits), hex (x + 1 or more digits),
// universal character name (u + 4 or 8 hex digits)
fn escape_sequence() -> Graph {
    let simple_escape_sequence = Graph::symbol(b"'\"?\\abfnrtv");
    let universal_character_name = Graph::union(
        Graph::symbol(b"u").concat(hex_quad()),
        Graph::symbol(b"u").concat(hex_quad().concat(hex_quad())),
    );
    let octal_escape_sequence = octal_digit().repeat(1, RangeUInt::Finite(3));
    let hexadecimal_escape_sequence = Graph::symbol(b"x").concat(hex_digit().plus());

    Graph::symbol(b"\\").concat(Graph::union(
        Graph::union(universal_character_name, simple_escape_sequence),
        Graph::union(octal_escape_sequence, hexadecimal_escape_sequence),
    ))
}

fn string_literal() -> Graph {
    let body = Graph::union(Graph::anybut(b"\"\\\n"), escape_sequence()).star();
    Graph::symbol(b"\"").concat(body.concat(Graph::symbol(b"\"")))
}

// no escape sequences inside character literals
fn character_literal() -> Graph {
    Graph::symbol(b"'").concat(Graph::symbol(ALNUM).concat(Graph::symbol(b"'")))
}

fn integer_literal() -> Graph {
    let decimal = Graph::symbol(NONZERO).concat(Graph::symbol(DIGIT).star());
    // also covers a lone 0
    let octal = Graph::symbol(b"0").concat(octal_digit().star());
    let hexadecimal = Graph::symbol(b"0").concat(Graph::symbol(b"xX").concat(hex_digit().plus()));
    Graph::union(decimal, Graph::union(hexadecimal, octal))
}

fn identifier() -> Graph {
    Graph::symbol(ALPHA).concat(Graph::symbol(ALNUM).star())
}

lexeme_set! {
    /// Tokens of the C subset mort understands, highest priority first.
    ///
    /// Longer punctuators precede their prefixes (`<<=` before `<<` before `<`) and keywords
    /// precede identifiers; keywords are word-boundary guarded so `ifx` is still an identifier.
    pub enum CTokens {
        eof: Eof,
        blank: [Newline, Whitespace],
        variable: [Identifier, Integer, StringLiteral, CharLiteral],
        lexemes: {
            // synthetic tokens
            Eof => "eof", Graph::never();

            // multi-character punctuators
            Ellipsis => "ellipsis", Graph::string("...");
            LshEqual => "lshequal", Graph::string("<<=");
            RshEqual => "rshequal", Graph::string(">>=");
            Arrow => "arrow", Graph::string("->");
            Incr => "incr", Graph::string("++");
            Decr => "decr", Graph::string("--");
            Lshift => "lshift", Graph::string("<<");
            Rshift => "rshift", Graph::string(">>");
            LEqual => "lequal", Graph::string("<=");
            REqual => "requal", Graph::string(">=");
            Equals => "equals", Graph::string("==");
            NEqual => "nequal", Graph::string("!=");
            And => "and", Graph::string("&&");
            Or => "or", Graph::string("||");
            MulEqual => "mulequal", Graph::string("*=");
            DivEqual => "divequal", Graph::string("/=");
            ModEqual => "modequal", Graph::string("%=");
            AddEqual => "addequal", Graph::string("+=");
            SubEqual => "subequal", Graph::string("-=");
            BandEqual => "bandequal", Graph::string("&=");
            BxorEqual => "bxorequal", Graph::string("^=");
            BorEqual => "borequal", Graph::string("|=");

            // brackets
            LParen => "lparen", Graph::symbol(b"(");
            RParen => "rparen", Graph::symbol(b")");
            LBrace => "lbrace", Graph::symbol(b"{");
            RBrace => "rbrace", Graph::symbol(b"}");
            LBrack => "lbrack", Graph::symbol(b"[");
            RBrack => "rbrack", Graph::symbol(b"]");
            LAngle => "langle", Graph::symbol(b"<");
            RAngle => "rangle", Graph::symbol(b">");

            // single-character punctuators
            Asterisk => "asterisk", Graph::symbol(b"*");
            Plus => "plus", Graph::symbol(b"+");
            Minus => "minus", Graph::symbol(b"-");
            Tilde => "tilde", Graph::symbol(b"~");
            FwdSlash => "fwdslash", Graph::symbol(b"/");
            Backslash => "backslash", Graph::symbol(b"\\");
            Percent => "percent", Graph::symbol(b"%");
            Hat => "hat", Graph::symbol(b"^");
            Pipe => "pipe", Graph::symbol(b"|");
            Ampersand => "ampersand", Graph::symbol(b"&");
            Exclaim => "exclaim", Graph::symbol(b"!");
            Semi => "semi", Graph::symbol(b";");
            Colon => "colon", Graph::symbol(b":");
            Comma => "comma", Graph::symbol(b",");
            Dot => "dot", Graph::symbol(b".");
            Equal => "equal", Graph::symbol(b"=");
            Question => "question", Graph::symbol(b"?");

            // keywords
            Break => "break", Graph::keyword("break");
            Case => "case", Graph::keyword("case");
            Continue => "continue", Graph::keyword("continue");
            Default => "default", Graph::keyword("default");
            Char => "char", Graph::keyword("char");
            Do => "do", Graph::keyword("do");
            Else => "else", Graph::keyword("else");
            Enum => "enum", Graph::keyword("enum");
            Extern => "extern", Graph::keyword("extern");
            Float => "float", Graph::keyword("float");
            For => "for", Graph::keyword("for");
            Goto => "goto", Graph::keyword("goto");
            If => "if", Graph::keyword("if");
            Int => "int", Graph::keyword("int");
            Long => "long", Graph::keyword("long");
            Open => "open", Graph::keyword("open");
            Closed => "closed", Graph::keyword("closed");
            Return => "return", Graph::keyword("return");
            Short => "short", Graph::keyword("short");
            Signed => "signed", Graph::keyword("signed");
            Sizeof => "sizeof", Graph::keyword("sizeof");
            Static => "static", Graph::keyword("static");
            Struct => "struct", Graph::keyword("struct");
            Switch => "switch", Graph::keyword("switch");
            Union => "union", Graph::keyword("union");
            Unsigned => "unsigned", Graph::keyword("unsigned");
            Void => "void", Graph::keyword("void");
            Volatile => "volatile", Graph::keyword("volatile");
            While => "while", Graph::keyword("while");

            // blank tokens
            Newline => "newline", Graph::symbol(b"\n");
            Whitespace => "ws", Graph::symbol(b" \t\x0B\x0C\r");

            // variable-content tokens
            Identifier => "ident", identifier();
            Integer => "integer", integer_literal();
            StringLiteral => "string", string_literal();
            CharLiteral => "character", character_literal();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use mort_nfa::{simulate, Simulation};

    use super::*;
    use crate::scanner::LexemeSet;

    fn longest(kind: CTokens, input: &str) -> Option<usize> {
        let mut stream = Cursor::new(input.as_bytes());
        match simulate(&kind.pattern(), &mut stream).expect("in-memory stream cannot fail") {
            Simulation::Matched(len) => Some(len),
            Simulation::Rejected(_) => None,
        }
    }

    #[test]
    fn ids_follow_declaration_order() {
        assert_eq!(CTokens::from_id(0), Some(CTokens::Eof));
        assert_eq!(CTokens::Eof.next(), Some(CTokens::Ellipsis));
        assert_eq!(CTokens::CharLiteral.next(), None);
        assert_eq!(CTokens::iter().count() as u32, CTokens::size());
        assert_eq!(CTokens::from_name("lparen"), Some(CTokens::LParen));
        assert_eq!(CTokens::from_name("nope"), None);
    }

    #[test]
    fn classification() {
        assert_eq!(CTokens::eof(), CTokens::Eof);
        assert!(CTokens::Whitespace.is_blank());
        assert!(CTokens::Newline.is_blank());
        assert!(!CTokens::Identifier.is_blank());
        assert!(CTokens::StringLiteral.has_variable_content());
        assert!(!CTokens::Return.has_variable_content());
    }

    #[test]
    fn string_literal_escapes() {
        let test_vectors = vec![
            (r#""""#, Some(2)),
            (r#""abc" x"#, Some(5)),
            (r#""a\n\"""#, Some(7)),
            (r#""\x1fz""#, Some(7)),
            (r#""\0""#, Some(4)),
            (r#""\177""#, Some(6)),
            (r#""é""#, Some(4)),
            (r#""\u0001F600""#, Some(12)),
            (r#""\q""#, None),
            ("\"abc", None),
            ("\"a\nb\"", None),
        ];

        for (input, expected) in test_vectors {
            assert_eq!(longest(CTokens::StringLiteral, input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn character_literal_has_no_escapes() {
        assert_eq!(longest(CTokens::CharLiteral, "'a'"), Some(3));
        assert_eq!(longest(CTokens::CharLiteral, "'_'"), Some(3));
        assert_eq!(longest(CTokens::CharLiteral, r"'\n'"), None);
        assert_eq!(longest(CTokens::CharLiteral, "'ab'"), None);
    }

    #[test]
    fn integer_forms() {
        let test_vectors = vec![
            ("42;", Some(2)),
            ("0", Some(1)),
            ("017", Some(3)),
            ("08", Some(1)),
            ("0x1F)", Some(4)),
            ("0x", Some(1)),
            ("x1", None),
        ];

        for (input, expected) in test_vectors {
            assert_eq!(longest(CTokens::Integer, input), expected, "input {:?}", input);
        }
    }
}
