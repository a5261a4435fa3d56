// ABOUTME: Parses program text into a generic tagged parse tree (spec.md §6)

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, multispace1, none_of, one_of},
    combinator::{opt, recognize, value},
    multi::{many0, many1},
    IResult, Parser,
};

/// A node of the generic parse tree the external grammar (spec.md §6) would
/// hand to a reader. `tag` is matched by substring in [`crate::reader`],
/// mirroring the mpc-style composite tags (`"number|numbI|regex"` and so on)
/// the original grammar produces; we keep just the parts the reader actually
/// inspects.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub tag: String,
    pub text: String,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    fn leaf(tag: &str, text: &str) -> Self {
        ParseNode {
            tag: tag.to_string(),
            text: text.to_string(),
            children: Vec::new(),
        }
    }

    fn branch(tag: &str, children: Vec<ParseNode>) -> Self {
        ParseNode {
            tag: tag.to_string(),
            text: String::new(),
            children,
        }
    }
}

fn ws(input: &str) -> IResult<&str, ()> {
    value((), multispace1).parse(input)
}

fn parse_comment(input: &str) -> IResult<&str, ParseNode> {
    let (input, _) = char(';')(input)?;
    let (input, rest) = take_while(|c| c != '\n' && c != '\r')(input)?;
    Ok((input, ParseNode::leaf("comment|regex", rest)))
}

fn ws_or_comment(input: &str) -> IResult<&str, ()> {
    many0(alt((ws, value((), parse_comment)))).map(|_| ()).parse(input)
}

fn parse_numb_f(input: &str) -> IResult<&str, ParseNode> {
    recognize((opt(char('-')), digit1, char('.'), digit1))
        .map(|text: &str| ParseNode::leaf("number|numbF|regex", text))
        .parse(input)
}

fn parse_numb_i(input: &str) -> IResult<&str, ParseNode> {
    recognize((opt(char('-')), digit1))
        .map(|text: &str| ParseNode::leaf("number|numbI|regex", text))
        .parse(input)
}

fn parse_number(input: &str) -> IResult<&str, ParseNode> {
    alt((parse_numb_f, parse_numb_i)).parse(input)
}

/// Symbol charset per spec.md §6: `[a-zA-Z0-9_+\-*\/\\=<>!&%^]+`.
fn parse_symbol(input: &str) -> IResult<&str, ParseNode> {
    recognize(many1(one_of(
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+-*/\\=<>!&%^",
    )))
    .map(|text: &str| ParseNode::leaf("symbol|regex", text))
    .parse(input)
}

fn parse_string(input: &str) -> IResult<&str, ParseNode> {
    let (input, _) = char('"')(input)?;
    let (input, content) = opt(nom::bytes::complete::escaped(
        none_of("\"\\"),
        '\\',
        one_of("\"\\nt"),
    ))
    .parse(input)?;
    let (input, _) = char('"')(input)?;
    let content = content.unwrap_or("");
    Ok((input, ParseNode::leaf("string|regex", content)))
}

fn parse_sexpr(input: &str) -> IResult<&str, ParseNode> {
    let (input, open) = char('(')(input)?;
    let mut children = vec![ParseNode::leaf("char|regex", &open.to_string())];
    let mut rest = input;
    loop {
        let (r, _) = ws_or_comment(rest)?;
        rest = r;
        if let Ok((r, close)) = char::<_, nom::error::Error<_>>(')')(rest) {
            children.push(ParseNode::leaf("char|regex", &close.to_string()));
            return Ok((r, ParseNode::branch("sexpr", children)));
        }
        let (r, node) = parse_expr(rest)?;
        children.push(node);
        rest = r;
    }
}

fn parse_qexpr(input: &str) -> IResult<&str, ParseNode> {
    let (input, open) = char('{')(input)?;
    let mut children = vec![ParseNode::leaf("char|regex", &open.to_string())];
    let mut rest = input;
    loop {
        let (r, _) = ws_or_comment(rest)?;
        rest = r;
        if let Ok((r, close)) = char::<_, nom::error::Error<_>>('}')(rest) {
            children.push(ParseNode::leaf("char|regex", &close.to_string()));
            return Ok((r, ParseNode::branch("qexpr", children)));
        }
        let (r, node) = parse_expr(rest)?;
        children.push(node);
        rest = r;
    }
}

fn parse_expr(input: &str) -> IResult<&str, ParseNode> {
    let (input, _) = ws_or_comment(input)?;
    alt((parse_sexpr, parse_qexpr, parse_number, parse_string, parse_symbol)).parse(input)
}

/// Parses a complete program (spec.md §6 `program` rule) into its top-level
/// expression nodes. Comments and whitespace between top-level forms are
/// discarded here; inner structure (brackets, nested comments) is left
/// intact for [`crate::reader`] to filter per its own skip rules.
pub fn parse_program(input: &str) -> Result<Vec<ParseNode>, String> {
    let mut rest = input;
    let mut nodes = Vec::new();
    loop {
        let (r, _) = ws_or_comment(rest).map_err(|e| format!("{e:?}"))?;
        rest = r;
        if rest.is_empty() {
            return Ok(nodes);
        }
        match parse_expr(rest) {
            Ok((r, node)) => {
                nodes.push(node);
                rest = r;
            }
            Err(e) => return Err(format!("Parse error: {e:?} at '{}'", &rest[..rest.len().min(40)])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_and_float() {
        let nodes = parse_program("42 -3.5").unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].tag.contains("numbI"));
        assert_eq!(nodes[0].text, "42");
        assert!(nodes[1].tag.contains("numbF"));
        assert_eq!(nodes[1].text, "-3.5");
    }

    #[test]
    fn parses_symbol() {
        let nodes = parse_program("foo-bar").unwrap();
        assert!(nodes[0].tag.contains("symbol"));
        assert_eq!(nodes[0].text, "foo-bar");
    }

    #[test]
    fn parses_operator_symbols() {
        for op in ["+", "-", "*", "/", "<=", ">=", "==", "&"] {
            let nodes = parse_program(op).unwrap();
            assert!(nodes[0].tag.contains("symbol"), "failed for {op}");
            assert_eq!(nodes[0].text, op);
        }
    }

    #[test]
    fn parses_string_with_escapes() {
        let nodes = parse_program(r#""hello\nworld""#).unwrap();
        assert!(nodes[0].tag.contains("string"));
        assert_eq!(nodes[0].text, r"hello\nworld");
    }

    #[test]
    fn parses_nested_sexpr_and_qexpr() {
        let nodes = parse_program("(+ 1 {2 3})").unwrap();
        assert!(nodes[0].tag.contains("sexpr"));
        // children: '(' + 1 {2 3} ')'
        assert_eq!(nodes[0].children.len(), 5);
        let qexpr = &nodes[0].children[3];
        assert!(qexpr.tag.contains("qexpr"));
    }

    #[test]
    fn skips_comments_between_expressions() {
        let nodes = parse_program("1 ; a comment\n2").unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn parses_empty_sexpr_and_qexpr() {
        let nodes = parse_program("()").unwrap();
        assert!(nodes[0].tag.contains("sexpr"));
        assert_eq!(nodes[0].children.len(), 2);
        let nodes = parse_program("{}").unwrap();
        assert!(nodes[0].tag.contains("qexpr"));
        assert_eq!(nodes[0].children.len(), 2);
    }

    #[test]
    fn multiple_top_level_expressions() {
        let nodes = parse_program("(def {x} 1)\n(+ x 1)").unwrap();
        assert_eq!(nodes.len(), 2);
    }
}
