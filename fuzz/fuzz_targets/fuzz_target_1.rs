#![no_main]
use libfuzzer_sys::fuzz_target;
use rill_json_ast::{parse, tokenize, TokenKind};

fuzz_target!(|data: &[u8]| {
    // Any byte sequence is fair input; we are looking for panics and
    // for the tokenizer and parser disagreeing.
    let tokens: Vec<_> = tokenize(data).collect();
    let terminals = tokens.iter().filter(|t| t.is_terminal()).count();
    assert_eq!(terminals, 1);

    let last = tokens.last().expect("stream is never empty");
    if last.kind == TokenKind::Illegal {
        assert!(parse(data).is_err());
    }
    if let Ok(document) = parse(data) {
        assert_eq!(last.kind, TokenKind::Eof);
        assert_eq!(parse(data).ok(), Some(document));
    }
});
