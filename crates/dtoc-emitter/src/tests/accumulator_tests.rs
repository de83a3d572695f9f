use super::*;

fn symbol(kind: SymbolKind, name: &str, origin: u32, text: &str) -> LocatedSymbol {
    LocatedSymbol {
        kind,
        name: name.to_string(),
        origin: FileId(origin),
        text: text.to_string(),
    }
}

#[test]
fn test_appends_in_order() {
    let mut accumulator = GlobalAccumulator::new();
    assert!(accumulator.is_empty());
    assert!(accumulator.append(symbol(SymbolKind::Enum, "A", 0, "export enum A {}")));
    assert!(accumulator.append(symbol(SymbolKind::TypeAlias, "B", 0, "export type B = string;")));
    assert_eq!(
        accumulator.as_str(),
        "export enum A {}\nexport type B = string;\n"
    );
    assert_eq!(accumulator.len(), 2);
}

#[test]
fn test_same_symbol_is_kept_once() {
    let mut accumulator = GlobalAccumulator::new();
    accumulator.append(symbol(SymbolKind::Enum, "Status", 0, "export enum Status {}"));
    assert!(!accumulator.append(symbol(SymbolKind::Enum, "Status", 0, "export enum Status {}")));
    assert_eq!(accumulator.as_str().matches("enum Status").count(), 1);
    assert!(accumulator.contains(SymbolKind::Enum, "Status", FileId(0)));
}

#[test]
fn test_key_includes_kind_and_origin() {
    let mut accumulator = GlobalAccumulator::new();
    assert!(accumulator.append(symbol(SymbolKind::Enum, "Status", 0, "a")));
    assert!(accumulator.append(symbol(SymbolKind::Enum, "Status", 1, "b")));
    assert!(accumulator.append(symbol(SymbolKind::TypeAlias, "Status", 0, "c")));
    assert_eq!(accumulator.len(), 3);
}
