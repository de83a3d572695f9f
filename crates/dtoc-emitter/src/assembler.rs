//! Output Assembler: the namespace-wrapped document and the raw artifact.

/// `export namespace <namespace> {` + global block + fragments + `}`.
pub fn assemble<S: AsRef<str>>(namespace: &str, global: &str, fragments: &[S]) -> String {
    let body = raw_text(global, fragments);
    let mut out = String::with_capacity(body.len() + namespace.len() + 24);
    out.push_str("export namespace ");
    out.push_str(namespace);
    out.push_str(" {\n");
    out.push_str(&body);
    out.push_str("}\n");
    out
}

/// Global block followed by every fragment, without the namespace wrapper.
/// This is what the raw artifact contains.
pub fn raw_text<S: AsRef<str>>(global: &str, fragments: &[S]) -> String {
    let mut out = String::from(global);
    for fragment in fragments {
        out.push_str(fragment.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_orders_global_before_fragments() {
        let out = assemble(
            "Dto",
            "export enum Status { A }\n",
            &["export type Foo = {\n  s: Status;\n};\n"],
        );
        assert_eq!(
            out,
            "export namespace Dto {\nexport enum Status { A }\nexport type Foo = {\n  s: Status;\n};\n}\n"
        );
    }

    #[test]
    fn test_empty_input() {
        let fragments: [&str; 0] = [];
        assert_eq!(assemble("Dto", "", &fragments), "export namespace Dto {\n}\n");
        assert_eq!(raw_text("", &fragments), "");
    }

    #[test]
    fn test_raw_text_has_no_wrapper() {
        let raw = raw_text("type A = 1;\n", &["x\n".to_string(), "y\n".to_string()]);
        assert_eq!(raw, "type A = 1;\nx\ny\n");
    }
}
