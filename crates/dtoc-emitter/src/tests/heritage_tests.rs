use super::*;
use crate::program::{FileId, Program};

fn terms_of(source: &str) -> Vec<ExtendTerm> {
    let mut program = Program::new();
    program.add_file("test.ts", source.to_string());
    let file = program.file(FileId(0));
    let classes = file.classes();
    let class = classes.first().expect("one class");
    resolve_extends(&file.arena, class.data()).into_vec()
}

#[test]
fn test_no_extends_clause() {
    assert!(terms_of("class A { x: string }").is_empty());
}

#[test]
fn test_plain_base() {
    assert_eq!(
        terms_of("class A extends Base {}"),
        [ExtendTerm::Plain("Base".to_string())]
    );
}

#[test]
fn test_partial_type_call() {
    assert_eq!(
        terms_of("class UpdateUser extends PartialType(CreateUser) {}"),
        [ExtendTerm::PartialWrapped("CreateUser".to_string())]
    );
}

#[test]
fn test_partial_type_is_case_insensitive() {
    assert_eq!(
        terms_of("class A extends partialtype(B) {}"),
        [ExtendTerm::PartialWrapped("B".to_string())]
    );
}

#[test]
fn test_partial_type_with_dotted_argument() {
    assert_eq!(
        terms_of("class A extends PartialType(dto.B) {}"),
        [ExtendTerm::PartialWrapped("dto.B".to_string())]
    );
}

#[test]
fn test_extends_list_keeps_order() {
    assert_eq!(
        terms_of("class C extends A, PartialType(B) {}"),
        [
            ExtendTerm::Plain("A".to_string()),
            ExtendTerm::PartialWrapped("B".to_string()),
        ]
    );
}

#[test]
fn test_other_forms_are_unrecognized() {
    let terms = terms_of("class A extends models.Base {}");
    assert_eq!(terms, [ExtendTerm::Unrecognized("models.Base".to_string())]);

    let terms = terms_of("class A extends OmitType(B, ['id']) {}");
    assert_eq!(terms.len(), 1);
    assert!(!terms[0].is_recognized());

    let terms = terms_of("class A extends Base<string> {}");
    assert_eq!(terms, [ExtendTerm::Unrecognized("Base<string>".to_string())]);
}

#[test]
fn test_implements_is_ignored() {
    assert_eq!(
        terms_of("class A extends B implements C, D {}"),
        [ExtendTerm::Plain("B".to_string())]
    );
}

#[test]
fn test_to_type_term() {
    assert_eq!(
        ExtendTerm::Plain("A".to_string()).to_type_term().as_deref(),
        Some("A")
    );
    assert_eq!(
        ExtendTerm::PartialWrapped("B".to_string()).to_type_term().as_deref(),
        Some("Partial<B>")
    );
    assert_eq!(ExtendTerm::Unrecognized("x.y".to_string()).to_type_term(), None);
}
