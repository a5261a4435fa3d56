// ABOUTME: Converts a tagged parse tree into the Value tree the evaluator runs on

use crate::parser::ParseNode;
use crate::value::Value;

/// C-style unescape, the inverse of the escaping `Value`'s `Display` does
/// when printing strings (spec.md §6, §4.9).
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// True for parse-tree children the reader must skip when recursing into an
/// sexpr/qexpr: bracket literals and comment nodes (spec.md §4.2).
fn is_skipped(node: &ParseNode) -> bool {
    node.text == "(" || node.text == ")" || node.text == "{" || node.text == "}" || node.tag == "regex" || node.tag.contains("comment")
}

/// Reads one parse-tree node into a `Value`, per the tag-match table in
/// spec.md §4.2.
pub fn read(node: &ParseNode) -> Value {
    if node.tag.contains("numbI") {
        return match node.text.parse::<i64>() {
            Ok(n) => Value::IntNum(n),
            Err(_) => Value::Err("invalid number".to_string()),
        };
    }
    if node.tag.contains("numbF") {
        return match node.text.parse::<f64>() {
            Ok(d) => Value::FloatNum(d),
            Err(_) => Value::Err("invalid number".to_string()),
        };
    }
    if node.tag.contains("string") {
        return Value::Str(unescape(&node.text));
    }
    if node.tag.contains("symbol") {
        return Value::Sym(node.text.clone());
    }
    if node.tag == ">" || node.tag.contains("sexpr") {
        let children = node.children.iter().filter(|c| !is_skipped(c)).map(read).collect();
        return Value::SExpr(children);
    }
    if node.tag.contains("qexpr") {
        let children = node.children.iter().filter(|c| !is_skipped(c)).map(read).collect();
        return Value::QExpr(children);
    }
    Value::Err(format!("unrecognized parse node tag '{}'", node.tag))
}

/// Reads every top-level node of a parsed program into `Value`s, in order.
pub fn read_program(nodes: &[ParseNode]) -> Vec<Value> {
    nodes.iter().map(read).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn read_one(src: &str) -> Value {
        let nodes = parse_program(src).unwrap();
        read(&nodes[0])
    }

    #[test]
    fn reads_integers_and_floats() {
        assert!(matches!(read_one("42"), Value::IntNum(42)));
        assert!(matches!(read_one("-7"), Value::IntNum(-7)));
        match read_one("3.5") {
            Value::FloatNum(d) => assert!((d - 3.5).abs() < f64::EPSILON),
            other => panic!("expected FloatNum, got {other}"),
        }
    }

    #[test]
    fn reads_symbol_and_string() {
        assert!(matches!(read_one("foo"), Value::Sym(s) if s == "foo"));
        match read_one(r#""hi\nthere""#) {
            Value::Str(s) => assert_eq!(s, "hi\nthere"),
            other => panic!("expected Str, got {other}"),
        }
    }

    #[test]
    fn reads_sexpr_skipping_brackets() {
        match read_one("(+ 1 2)") {
            Value::SExpr(items) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(&items[0], Value::Sym(s) if s == "+"));
            }
            other => panic!("expected SExpr, got {other}"),
        }
    }

    #[test]
    fn reads_qexpr_and_nesting() {
        match read_one("{1 {2 3}}") {
            Value::QExpr(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(&items[1], Value::QExpr(inner) if inner.len() == 2));
            }
            other => panic!("expected QExpr, got {other}"),
        }
    }

    #[test]
    fn reads_empty_sexpr() {
        match read_one("()") {
            Value::SExpr(items) => assert!(items.is_empty()),
            other => panic!("expected empty SExpr, got {other}"),
        }
    }

    #[test]
    fn reads_whole_program_in_order() {
        let nodes = parse_program("1 2 3").unwrap();
        let values = read_program(&nodes);
        assert_eq!(values.len(), 3);
    }
}
