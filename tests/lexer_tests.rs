// tests/lexer_tests.rs

use tasq_lang::ast::Token;
use tasq_lang::lexer::{tokenize, LexError, Lexer};

// ============================================================================
// Delimiters and Keywords
// ============================================================================

#[test]
fn test_parens() {
    let test_cases = vec![("(", Token::LParen), (")", Token::RParen)];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_keywords_case_insensitive() {
    let test_cases = vec![
        ("AND", Token::And),
        ("and", Token::And),
        ("And", Token::And),
        ("OR", Token::Or),
        ("or", Token::Or),
        ("oR", Token::Or),
        ("NOT", Token::Not),
        ("not", Token::Not),
        ("Not", Token::Not),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_keywords_match_whole_identifiers_only() {
    // "android" starts with "and" but is a tag, not a keyword
    let test_cases = vec![
        ("android", Token::Tag("android".to_string())),
        ("order", Token::Tag("order".to_string())),
        ("nothing", Token::Tag("nothing".to_string())),
        ("ands", Token::Tag("ands".to_string())),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
    }
}

// ============================================================================
// Tag Tokens
// ============================================================================

#[test]
fn test_tag_prefix_form() {
    let test_cases = vec![
        ("tag:work", "work"),
        ("tag:follow-up", "follow-up"),
        ("tag:q3_goals", "q3_goals"),
        ("tag:2024", "2024"),
        ("TAG:work", "work"),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(
            token,
            Token::Tag(expected.to_string()),
            "Failed for input: {}",
            input
        );
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_bare_identifiers_are_tags() {
    let test_cases = vec![
        ("urgent", "urgent"),
        ("follow-up", "follow-up"),
        ("_internal", "_internal"),
        ("v2", "v2"),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(
            token,
            Token::Tag(expected.to_string()),
            "Failed for input: {}",
            input
        );
    }
}

// ============================================================================
// Text Tokens
// ============================================================================

#[test]
fn test_double_quoted_string() {
    let mut lexer = Lexer::new(r#""quarterly report""#);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Text("quarterly report".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_single_quoted_string() {
    let mut lexer = Lexer::new("'late invoice'");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Text("late invoice".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_escaped_quotes() {
    let test_cases = vec![
        (r#""say \"hi\"""#, r#"say "hi""#),
        (r#"'it\'s due'"#, "it's due"),
        (r#""a\\b""#, r"a\b"),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(
            token,
            Token::Text(expected.to_string()),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_text_field_form() {
    let mut lexer = Lexer::new("text:report");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Text("report".to_string())
    );
}

// ============================================================================
// Completed Tokens
// ============================================================================

#[test]
fn test_completed_values() {
    let test_cases = vec![
        ("completed:true", true),
        ("completed:false", false),
        ("completed:TRUE", true),
        ("completed:False", false),
        ("COMPLETED:true", true),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(
            token,
            Token::Completed(expected),
            "Failed for input: {}",
            input
        );
    }
}

// ============================================================================
// Whole Queries
// ============================================================================

#[test]
fn test_full_query_token_sequence() {
    let tokens = tokenize("tag:work AND (urgent OR personal) AND NOT archived").unwrap();

    assert_eq!(
        tokens,
        vec![
            Token::Tag("work".to_string()),
            Token::And,
            Token::LParen,
            Token::Tag("urgent".to_string()),
            Token::Or,
            Token::Tag("personal".to_string()),
            Token::RParen,
            Token::And,
            Token::Not,
            Token::Tag("archived".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_whitespace_is_insignificant() {
    let compact = tokenize("(tag:a)OR'b'").unwrap();
    let spaced = tokenize("  ( tag:a )   OR  'b'  ").unwrap();
    assert_eq!(compact, spaced);
}

#[test]
fn test_tokenize_is_deterministic() {
    let query = "tag:work AND (urgent OR \"big report\") AND NOT completed:true";
    assert_eq!(tokenize(query).unwrap(), tokenize(query).unwrap());
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize("").unwrap(), vec![Token::Eof]);
    assert_eq!(tokenize("   \t\n").unwrap(), vec![Token::Eof]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_bare_tag_prefix_is_error() {
    let err = tokenize("tag:").unwrap_err();
    assert_eq!(
        err,
        LexError::MissingValue {
            key: "tag".to_string(),
            position: 0,
        }
    );
}

#[test]
fn test_invalid_tag_name_is_error() {
    let err = tokenize("tag:a:b").unwrap_err();
    assert!(matches!(err, LexError::InvalidTagName { .. }));
}

#[test]
fn test_unknown_field_is_error() {
    let err = tokenize("due:today").unwrap_err();
    assert_eq!(
        err,
        LexError::UnknownField {
            key: "due".to_string(),
            position: 0,
        }
    );
}

#[test]
fn test_bad_completed_value_is_error() {
    let err = tokenize("completed:maybe").unwrap_err();
    assert!(matches!(err, LexError::InvalidCompletedValue { .. }));
}

#[test]
fn test_unexpected_char_reports_offset() {
    let err = tokenize("tag:work !").unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            ch: '!',
            position: 9,
        }
    );
}

#[test]
fn test_unterminated_string_is_error() {
    let err = tokenize(r#"tag:a "oops"#).unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { position: 6 });
}

#[test]
fn test_invalid_escape_is_error() {
    let err = tokenize(r#""bad \x escape""#).unwrap_err();
    assert!(matches!(err, LexError::InvalidEscape { ch: 'x', .. }));
}
