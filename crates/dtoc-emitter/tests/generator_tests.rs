//! End-to-end generation over in-memory programs.

use dtoc_emitter::{Generator, PrintOptions, Program, format_output};

fn program(files: &[(&str, &str)]) -> Program {
    let mut program = Program::new();
    for (path, source) in files {
        program.add_file(path, source.to_string());
    }
    program
}

fn generate(files: &[(&str, &str)]) -> (String, String) {
    let program = program(files);
    let mut generator = Generator::new(&program, "Dto");
    generator.run().expect("generation succeeds");
    (generator.assemble(), generator.raw_text())
}

#[test]
fn test_class_without_properties_is_permissive_record() {
    let (output, raw) = generate(&[("empty.ts", "export class Empty {}")]);
    assert_eq!(raw, "export type Empty = Record<string, any>;\n\n");
    assert_eq!(
        format_output(&output, &PrintOptions::default()),
        "export namespace Dto {\n  export type Empty = Record<string, any>;\n}\n"
    );
}

#[test]
fn test_fields_keep_order_optional_markers_and_docs() {
    let source = r#"
import { ApiProperty } from '@nestjs/swagger';

/**
 * Payload for creating a user.
 */
export class CreateUserDto {
  /** Login e-mail. */
  @ApiProperty()
  email: string;

  @ApiProperty({ required: false })
  nickname?: string;

  age!: number;

  private password: string;
  static readonly kind = 'user';
  #secret = 1;

  constructor() {}

  greet(): string {
    return `hi ${this.nickname}`;
  }
}
"#;
    let (output, _) = generate(&[("src/create-user.dto.ts", source)]);
    let formatted = format_output(&output, &PrintOptions::default());
    let expected = r#"export namespace Dto {
  /**
   * Payload for creating a user.
   */
  export type CreateUserDto = {
    /** Login e-mail. */
    email: string;
    nickname?: string;
    age: number;
    password: string;
  };
}
"#;
    assert_eq!(formatted, expected, "{formatted}");
}

#[test]
fn test_partial_type_and_extends_list() {
    let (_, raw) = generate(&[(
        "users.ts",
        "export class UpdateUserDto extends PartialType(CreateUserDto) {}\n\
         export class AdminDto extends UserDto, AuditDto {}\n\
         export class Patch extends PartialType(Base) { reason?: string }",
    )]);
    assert!(raw.contains("export type UpdateUserDto = Partial<CreateUserDto>;\n"), "{raw}");
    assert!(raw.contains("export type AdminDto = UserDto & AuditDto;\n"), "{raw}");
    assert!(
        raw.contains("export type Patch = Partial<Base> & {\n  reason?: string;\n};\n"),
        "{raw}"
    );
}

#[test]
fn test_same_file_enum_emitted_once_before_class() {
    let source = "export enum Status {\n  Active = 'active',\n  Blocked = 'blocked',\n}\n\n\
                  export class Foo {\n  status: Status;\n  previous?: Status;\n}\n\n\
                  export class Bar {\n  status: Status;\n}\n";
    let (output, raw) = generate(&[("foo.ts", source)]);

    assert_eq!(raw.matches("export enum Status").count(), 1, "{raw}");
    let enum_at = output.find("export enum Status").expect("enum emitted");
    let foo_at = output.find("export type Foo").expect("Foo emitted");
    assert!(enum_at < foo_at, "{output}");
    assert!(output.starts_with("export namespace Dto {\nexport enum Status {"), "{output}");
}

#[test]
fn test_classes_from_several_files_in_order() {
    let (_, raw) = generate(&[
        ("a.ts", "export class A { x: number }"),
        ("b.ts", "export class B { y: string }\nexport class C {}"),
    ]);
    let a = raw.find("export type A").unwrap();
    let b = raw.find("export type B").unwrap();
    let c = raw.find("export type C").unwrap();
    assert!(a < b && b < c, "{raw}");
}

#[test]
fn test_rerun_is_byte_identical() {
    let files = [
        ("dto/meta.ts", "export type Meta = Record<string, string>;\nexport enum Kind { A, B }"),
        (
            "dto/user.ts",
            "import { Meta, Kind } from './meta';\nexport class User { meta: Meta; kinds: Kind[] }",
        ),
    ];
    let (first_output, first_raw) = generate(&files);
    let (second_output, second_raw) = generate(&files);
    assert_eq!(first_raw, second_raw);
    assert_eq!(first_output, second_output);
}

#[test]
fn test_incremental_output_after_each_file() {
    let program = program(&[
        ("a.ts", "export class A {}"),
        ("b.ts", "export class B {}"),
    ]);
    let mut generator = Generator::new(&program, "Models");
    let first = program.files()[0].id;
    let second = program.files()[1].id;

    generator.process_file(first).unwrap();
    let partial = generator.assemble();
    assert!(partial.contains("export type A"));
    assert!(!partial.contains("export type B"));

    generator.process_file(second).unwrap();
    assert!(generator.assemble().contains("export type B"));
    assert_eq!(
        generator.class_declarations().keys().collect::<Vec<_>>(),
        ["A", "B"]
    );
    assert_eq!(generator.namespace(), "Models");
}

#[test]
fn test_multi_line_generic_alias_formats_to_valid_output() {
    let source = "export type Meta = Map<\n  string,\n  number\n>;\n\nexport class Foo {\n  m: Meta;\n  r: Record<\n    string,\n    number\n  >;\n}\n";
    let (output, _) = generate(&[("foo.ts", source)]);
    let formatted = format_output(&output, &PrintOptions::default());
    let expected = r#"export namespace Dto {
  export type Meta = Map<
    string,
    number
  >;
  export type Foo = {
    m: Meta;
    r: Record<
      string,
      number
    >;
  };
}
"#;
    assert_eq!(formatted, expected, "{formatted}");
}
