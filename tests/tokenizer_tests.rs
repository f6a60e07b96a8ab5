//! End-to-end tokenizer tests over realistic PDF fragments: token kind
//! sequences, fused references, string decoding and text conversion.

use pdflex::encoding::bytes_to_text;
use pdflex::number::decode_number;
use pdflex::strings::{decode_hex_string, decode_literal_string, decode_name};
use pdflex::{source, Lexer, TokenKind};

fn check_token_kinds(data: &[u8], expected: &[TokenKind]) {
    let mut lexer = Lexer::new(source::from_bytes(data.to_vec()));
    for (i, &kind) in expected.iter().enumerate() {
        assert_eq!(lexer.next_valid_token().unwrap(), kind, "position {i}");
    }
}

#[test]
fn test_one_number() {
    check_token_kinds(
        b"/Name1 70",
        &[TokenKind::Name, TokenKind::Number, TokenKind::EndOfFile],
    );
}

#[test]
fn test_two_numbers() {
    check_token_kinds(
        b"/Name1 70/Name 2",
        &[
            TokenKind::Name,
            TokenKind::Number,
            TokenKind::Name,
            TokenKind::Number,
            TokenKind::EndOfFile,
        ],
    );
}

#[test]
fn test_trailer_dictionary_kinds() {
    check_token_kinds(
        b"<</Size 70/Root 46 0 R/Info 44 0 R/ID[<8C2547D58D4BD2C6F3D32B830BE3259D><8F69587888569A458EB681A4285D5879>]/Prev 116 >>",
        &[
            TokenKind::StartDic,
            TokenKind::Name,
            TokenKind::Number,
            TokenKind::Name,
            TokenKind::Ref,
            TokenKind::Name,
            TokenKind::Ref,
            TokenKind::Name,
            TokenKind::StartArray,
            TokenKind::String,
            TokenKind::String,
            TokenKind::EndArray,
            TokenKind::Name,
            TokenKind::Number,
            TokenKind::EndDic,
            TokenKind::EndOfFile,
        ],
    );
}

#[test]
fn test_primitives_walk() {
    let data = b"<</Size 70.\
/Value#20 .1\
/Root 46 0 R\
/Info 44 0 R\
/ID[<736f6d652068657820737472696e672>(some simple string )<8C2547D58D4BD2C6F3D32B830BE3259D2>-70.1--0.2]\
/Name1 --15\
/Prev ---116.23 >>";
    let mut lex = Lexer::new(source::from_bytes(data.to_vec()));

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::StartDic);

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(decode_name(&lex.byte_content()), b"Size");

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Number);
    assert_eq!(lex.byte_content(), b"70.");
    assert_eq!(decode_number(&lex.byte_content()).unwrap(), 70.0);

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(decode_name(&lex.byte_content()), b"Value ");

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Number);
    assert_eq!(decode_number(&lex.byte_content()).unwrap(), 0.1);

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(decode_name(&lex.byte_content()), b"Root");

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Ref);
    assert_eq!((lex.obj_nr(), lex.gen_nr()), (46, 0));

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(decode_name(&lex.byte_content()), b"Info");

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Ref);
    assert_eq!((lex.obj_nr(), lex.gen_nr()), (44, 0));

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(decode_name(&lex.byte_content()), b"ID");

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::StartArray);

    // Odd-length hex string, trailing digit padded with zero
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::String);
    assert!(lex.is_hex_string());
    assert_eq!(
        bytes_to_text(&decode_hex_string(&lex.byte_content()).unwrap()),
        "some hex string "
    );

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::String);
    assert!(!lex.is_hex_string());
    assert_eq!(
        bytes_to_text(&decode_literal_string(&lex.byte_content())),
        "some simple string "
    );

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::String);
    assert!(lex.is_hex_string());
    assert_eq!(
        bytes_to_text(&decode_hex_string(&lex.byte_content()).unwrap()),
        "\u{8C}%G\u{D5}\u{8D}K\u{D2}\u{C6}\u{F3}\u{D3}+\u{83}\u{0B}\u{E3}%\u{9D} "
    );

    // Adjacent signed numbers split at the second sign run
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Number);
    assert_eq!(decode_number(&lex.byte_content()).unwrap(), -70.1);

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Number);
    assert_eq!(decode_number(&lex.byte_content()).unwrap(), -0.2);

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::EndArray);

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(decode_name(&lex.byte_content()), b"Name1");

    // Double minus on an integer decodes to zero
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Number);
    assert_eq!(decode_number(&lex.byte_content()).unwrap(), 0.0);

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(decode_name(&lex.byte_content()), b"Prev");

    // Triple minus on a real keeps a single minus
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Number);
    assert_eq!(decode_number(&lex.byte_content()).unwrap(), -116.23);

    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::EndDic);
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::EndOfFile);
}

#[test]
fn test_hex_string_to_text() {
    let mut lex = Lexer::new(source::from_bytes(
        b"<0D0A09557365729073204775696465>".to_vec(),
    ));
    assert_eq!(lex.next_token().unwrap(), TokenKind::String);
    assert!(lex.is_hex_string());
    let bytes = decode_hex_string(&lex.byte_content()).unwrap();
    assert_eq!(bytes_to_text(&bytes), "\r\n\tUser\u{90}s Guide");
}

#[test]
fn test_bom_selects_utf16() {
    // The same digits mean different things for hex and literal strings
    let digits = b"FEFF041F04400438043204350442";
    let hex_bytes = decode_hex_string(digits).unwrap();
    assert_eq!(bytes_to_text(&hex_bytes), "Привет");

    let literal_bytes = decode_literal_string(digits);
    assert_eq!(bytes_to_text(&literal_bytes), "FEFF041F04400438043204350442");
}

#[test]
fn test_line_continuations_in_document() {
    let mut lex = Lexer::new(source::from_bytes(
        b"(These\\\n two\\\r strings\\\n are the same)".to_vec(),
    ));
    assert_eq!(lex.next_token().unwrap(), TokenKind::String);
    assert_eq!(
        bytes_to_text(&decode_literal_string(&lex.byte_content())),
        "These two strings are the same"
    );
}

#[test]
fn test_octal_escapes_in_document() {
    let mut lex = Lexer::new(source::from_bytes(
        b"(This string contains \\245two octal characters\\307)".to_vec(),
    ));
    assert_eq!(lex.next_token().unwrap(), TokenKind::String);
    assert_eq!(
        bytes_to_text(&decode_literal_string(&lex.byte_content())),
        "This string contains \u{A5}two octal characters\u{C7}"
    );
}

#[test]
fn test_token_value_equals_to() {
    let data = b"SomeString";
    let mut lex = Lexer::new(source::from_bytes(data.to_vec()));
    lex.next_token().unwrap();
    assert!(lex.token_value_equals_to(data));
}

#[test]
fn test_byte_content_matches_source_slice() {
    let data: &[u8] = b"<</Size 70/Root 46 0 R>>";
    let mut lex = Lexer::new(source::from_bytes(data.to_vec()));
    loop {
        match lex.next_token().unwrap() {
            TokenKind::EndOfFile => break,
            _ => {
                let (start, end) = (lex.token_start() as usize, lex.token_end() as usize);
                assert!(end <= data.len());
                assert_eq!(lex.byte_content(), &data[start..end]);
            }
        }
    }
}

#[test]
fn test_tokenize_from_file() {
    use std::io::Write;

    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")
        .unwrap();
    tmp.flush().unwrap();

    let src = source::from_file(tmp.path()).unwrap();
    let mut lex = Lexer::new(src);
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Obj);
    assert_eq!((lex.obj_nr(), lex.gen_nr()), (1, 0));
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::StartDic);
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Name);
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Ref);
    assert_eq!((lex.obj_nr(), lex.gen_nr()), (2, 0));
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::EndDic);
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::Other);
    assert!(lex.token_value_equals_to(b"endobj"));
    assert_eq!(lex.next_valid_token().unwrap(), TokenKind::EndOfFile);
}

#[test]
fn test_independent_lexers_share_source() {
    let src = source::from_bytes(b"/A /B".to_vec());
    let mut first = Lexer::new(std::sync::Arc::clone(&src));
    let mut second = Lexer::new(src);

    first.next_token().unwrap();
    second.next_token().unwrap();
    second.next_token().unwrap();

    assert_eq!(first.byte_content(), b"A");
    assert_eq!(second.byte_content(), b"B");
}
