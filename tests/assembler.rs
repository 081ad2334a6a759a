#[macro_use]
mod common;

use common::{assemble_err, assemble_text, word};
use hasm::assembler::{
    self,
    phases::{classify, encode},
    Error, Loc, Located,
};
use hasm::spec::defs::{fields::Field, predef::PREDEFINED};

#[test]
fn single_instructions() {
    assert_assembles!("@2", ["0000000000000010"]);
    assert_assembles!("@SP", ["0000000000000000"]);
    assert_assembles!("D=D+1", ["1110011111010000"]);
    assert_assembles!("0;JMP", ["1110101010000111"]);
}

#[test]
fn leading_label_resolves_to_zero() {
    assert_assembles!(
        "(LOOP)\n@LOOP\n0;JMP",
        ["0000000000000000", "1110101010000111"]
    );
}

#[test]
fn first_variable_is_sixteen() {
    assert_assembles!("@foo", ["0000000000010000"]);
}

#[test]
fn numeric_operands_encode_verbatim() {
    for &n in &[0u16, 1, 15, 16, 255, 4096, 16384, 24576, 32767, 32768, 65535] {
        assert_eq!(assemble_text(&format!("@{}", n)), vec![word(n)]);
    }
}

#[test]
fn numeric_operand_too_wide() {
    assert_eq!(
        assemble_err("@1\n@65536"),
        Error::Encode(Located::with_loc(
            Loc::new(2),
            encode::Error::AddressOutOfRange(String::from("65536"))
        ))
    );
}

#[test]
fn predefined_symbols_ignore_program_content() {
    for &(name, addr) in PREDEFINED.iter() {
        let src = format!("@x\n(LOOP)\n@{}\n@y\n@LOOP\n0;JMP", name);
        assert_eq!(assemble_text(&src)[1], word(addr), "{}", name);
    }
}

#[test]
fn forward_and_backward_references_agree() {
    let out = assemble_text(
        "
        @END
        0;JMP
        (END)
        @END
        0;JMP
        ",
    );
    assert_eq!(out.len(), 4);
    assert_eq!(out[0], word(2));
    assert_eq!(out[0], out[2]);
}

#[test]
fn labels_are_resolved_before_variables() {
    // `LOOP` is declared after its first use, so it must not be taken for a variable.
    assert_assembles!(
        "@LOOP\n@v\n(LOOP)\n@w",
        ["0000000000000010", "0000000000010000", "0000000000010001"]
    );
}

#[test]
fn variables_in_order_of_first_use() {
    let out = assemble_text("@i\nM=1\n@j\nM=0\n@i\nD=M\n@k\n@j");
    assert_eq!(out[0], word(16));
    assert_eq!(out[2], word(17));
    assert_eq!(out[4], word(16));
    assert_eq!(out[6], word(18));
    assert_eq!(out[7], word(17));
}

#[test]
fn symbols_are_case_insensitive() {
    assert_eq!(
        assemble_text("(Loop)\n@counter\n@COUNTER\n@loop\n@sp\n@screen"),
        vec![word(16), word(16), word(0), word(0), word(16384)]
    );
}

#[test]
fn redeclared_label_is_ignored() {
    assert_assembles!(
        "(X)\n@X\n(X)\n@X",
        ["0000000000000000", "0000000000000000"]
    );
}

#[test]
fn ignored_lines_emit_nothing() {
    let out = assemble_text(
        "
        // a comment


        (A)   // a label
        @A    // the only instruction
        (B)
        ",
    );
    assert_eq!(out, vec![word(0)]);
    assert!(assembler::assemble_source("// nothing\n\n").unwrap().is_empty());
}

#[test]
fn whitespace_and_comments_inside_instructions() {
    assert_assembles!(
        "   D = D + 1   // increment\n\tAM = M - 1;  JNE",
        ["1110011111010000", "1111110010101101"]
    );
}

#[test]
fn every_codeword_is_sixteen_binary_digits() {
    let src = include_str!("../asm/test/sum.asm");
    for line in assemble_text(src) {
        assert_eq!(line.len(), 16);
        assert!(line.chars().all(|c| c == '0' || c == '1'));
    }
}

#[test]
fn idempotent_across_translations() {
    let src = include_str!("../asm/test/max.asm");
    let first = assembler::assemble_source(src).unwrap();
    let _ = assembler::assemble_source("@a\n@b\n@c\n(MORE)\n@MORE").unwrap();
    let second = assembler::assemble_source(src).unwrap();
    assert_eq!(first, second);
}

#[test]
fn no_state_leaks_between_programs() {
    assert_eq!(assemble_text("@first\n@second"), vec![word(16), word(17)]);
    assert_eq!(assemble_text("@second"), vec![word(16)]);
    // A label from the earlier program must be a fresh variable here.
    assert_eq!(assemble_text("(LBL)\n@x\n@LBL"), vec![word(16), word(0)]);
    assert_eq!(assemble_text("@LBL"), vec![word(16)]);
}

#[test]
fn lines_iterator_input() {
    let lines = vec![String::from("@3"), String::from("D=A")];
    assert_eq!(
        assembler::assemble(lines.iter()),
        assembler::assemble_source("@3\nD=A")
    );
}

#[test]
fn program_exposes_symbols() {
    let prog = assembler::assemble_program(include_str!("../asm/test/sum.asm").lines()).unwrap();
    let names = prog
        .symbols
        .user_symbols()
        .into_iter()
        .map(|(name, sym)| (name.to_string(), sym.addr))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            (String::from("LOOP"), 4),
            (String::from("END"), 18),
            (String::from("I"), 16),
            (String::from("SUM"), 17),
        ]
    );
}

#[test]
fn classification_error_reports_line() {
    assert_eq!(
        assemble_err("@1\n\nnot an instruction"),
        Error::Classify(Located::with_loc(
            Loc::new(3),
            classify::Error::Unclassifiable(String::from("not an instruction"))
        ))
    );
    assert_eq!(
        assemble_err("(2FAST)"),
        Error::Classify(Located::with_loc(
            Loc::new(1),
            classify::Error::MalformedLabel(String::from("2FAST"))
        ))
    );
}

#[test]
fn unknown_mnemonics_abort() {
    assert_eq!(
        assemble_err("@1\nD=D*A"),
        Error::Encode(Located::with_loc(
            Loc::new(2),
            encode::Error::UnknownMnemonic(Field::Comp, String::from("D*A"))
        ))
    );
    assert_eq!(
        assemble_err("X=D"),
        Error::Encode(Located::with_loc(
            Loc::new(1),
            encode::Error::UnknownMnemonic(Field::Dest, String::from("X"))
        ))
    );
    assert_eq!(
        assemble_err("D;JUMP"),
        Error::Encode(Located::with_loc(
            Loc::new(1),
            encode::Error::UnknownMnemonic(Field::Jump, String::from("JUMP"))
        ))
    );
}

#[test]
fn malformed_compute_aborts() {
    assert_eq!(
        assemble_err("D=A=M"),
        Error::Encode(Located::with_loc(
            Loc::new(1),
            encode::Error::MalformedCompute(String::from("D=A=M"))
        ))
    );
}

#[test]
fn illegal_symbol_aborts() {
    assert_eq!(
        assemble_err("@-1"),
        Error::Encode(Located::with_loc(
            Loc::new(1),
            encode::Error::IllegalSymbol(String::from("-1"))
        ))
    );
}

#[test]
fn error_messages_name_the_phase() {
    let msg = assemble_err("@1\nD=D*A").to_string();
    assert!(msg.starts_with("Assembly Error (in Encoder)"), "{}", msg);
    assert!(msg.contains("line: 2"), "{}", msg);
    assert!(msg.contains("D*A"), "{}", msg);

    let msg = assemble_err("junk").to_string();
    assert!(msg.starts_with("Assembly Error (in Classifier)"), "{}", msg);
}
