//! Property tests for the lexer over generated inputs:
//!
//! 1. lexing never panics and spans stay inside the source
//! 2. every non-final token is non-empty and advances the position
//! 3. separators and token texts reconstruct the source

use proptest::prelude::*;

use super::prelude::{Lexer, TokenStream, WHITESPACE};

/// Biased toward the characters the lexer cares about.
fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(" ".to_string()),
            Just("\r\n".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just(":".to_string()),
            Just(",".to_string()),
            "[a-z]{1,4}",
            "-?[0-9]{1,6}",
            "\\PC{1,3}",
        ],
        1..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn lexer_never_panics(input in "\\PC*") {
        if let Ok(stream) = TokenStream::tokenize(&input) {
            for token in stream.iter() {
                prop_assert!(token.start <= token.end);
                prop_assert!(token.end as usize <= input.len());
            }
        }
    }

    #[test]
    fn tokens_make_progress(input in source()) {
        let lexer = Lexer::new(&input).unwrap();
        let mut position = 0;

        loop {
            let token = lexer.lex(position).unwrap();
            if token.is_eof() {
                prop_assert_eq!(token.end as usize, input.len());
                break;
            }

            prop_assert!(token.end > position);
            prop_assert!(token.len() > 0);
            position = token.end;
        }
    }

    #[test]
    fn separators_are_whitespace(input in source()) {
        let stream = TokenStream::tokenize(&input).unwrap();

        for separator in stream.separators() {
            prop_assert!(separator.chars().all(|ch| WHITESPACE.contains(&ch)));
        }
    }

    #[test]
    fn spans_round_trip(input in source()) {
        let stream = TokenStream::tokenize(&input).unwrap();

        prop_assert_eq!(stream.reconstruct(), input);
    }
}
