//! The pattern-query text syntax.
//!
//! Line-oriented: an optional `select` line followed by one triple pattern
//! per line, each optionally terminated by `.`:
//!
//! ```text
//! select ?dataset ?title
//! ?catalog a dcat:Catalog .
//! ?catalog dcat:dataset ?dataset .
//! ?dataset dcterms:title ?title .
//! ```
//!
//! Terms are `?var`, `<iri>`, `prefix:local` (resolved against the supplied
//! prefix table), a quoted `"literal"`, or the usual `a` shorthand for
//! `rdf:type`. Blank lines and `#` comments are ignored.

use crate::pattern::{PatternQuery, PatternTerm, TriplePattern};
use crate::QueryError;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::multispace0,
    combinator::map,
    sequence::{delimited, preceded},
    IResult,
};
use std::collections::BTreeMap;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// An unresolved term, straight from the text.
#[derive(Debug, Clone, PartialEq)]
enum RawTerm {
    Var(String),
    Iri(String),
    Prefixed { prefix: String, local: String },
    Literal(String),
    TypeKeyword,
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

fn var_term(input: &str) -> IResult<&str, RawTerm> {
    map(preceded(tag("?"), ident), |name: &str| {
        RawTerm::Var(name.to_string())
    })(input)
}

fn iri_term(input: &str) -> IResult<&str, RawTerm> {
    map(
        delimited(tag("<"), take_while1(|c: char| c != '>'), tag(">")),
        |iri: &str| RawTerm::Iri(iri.to_string()),
    )(input)
}

fn literal_term(input: &str) -> IResult<&str, RawTerm> {
    map(
        delimited(tag("\""), take_while(|c: char| c != '"'), tag("\"")),
        |text: &str| RawTerm::Literal(text.to_string()),
    )(input)
}

fn prefixed_term(input: &str) -> IResult<&str, RawTerm> {
    let (input, prefix) = ident(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, local) =
        take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')(input)?;
    Ok((
        input,
        RawTerm::Prefixed {
            prefix: prefix.to_string(),
            local: local.to_string(),
        },
    ))
}

fn type_keyword(input: &str) -> IResult<&str, RawTerm> {
    // Bare `a` only; `a:b` is a prefixed name, so try that first.
    map(tag("a"), |_| RawTerm::TypeKeyword)(input)
}

fn term(input: &str) -> IResult<&str, RawTerm> {
    preceded(
        multispace0,
        alt((var_term, iri_term, literal_term, prefixed_term, type_keyword)),
    )(input)
}

fn pattern_line(input: &str) -> IResult<&str, (RawTerm, RawTerm, RawTerm)> {
    let (input, s) = term(input)?;
    let (input, p) = term(input)?;
    let (input, o) = term(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = nom::combinator::opt(tag("."))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (s, p, o)))
}

fn resolve(
    raw: RawTerm,
    prefixes: &BTreeMap<String, String>,
) -> Result<PatternTerm, QueryError> {
    match raw {
        RawTerm::Var(name) => Ok(PatternTerm::Var(name)),
        RawTerm::Iri(iri) => Ok(PatternTerm::Iri(iri)),
        RawTerm::Literal(text) => Ok(PatternTerm::Literal(text)),
        RawTerm::TypeKeyword => Ok(PatternTerm::Iri(RDF_TYPE.to_string())),
        RawTerm::Prefixed { prefix, local } => {
            let namespace = prefixes
                .get(&prefix)
                .ok_or_else(|| QueryError::UnknownPrefix(prefix.clone()))?;
            Ok(PatternTerm::Iri(format!("{namespace}{local}")))
        }
    }
}

/// Parse a pattern-query text against a prefix table.
pub fn parse_pattern_query(
    text: &str,
    prefixes: &BTreeMap<String, String>,
) -> Result<PatternQuery, QueryError> {
    let mut select: Vec<String> = Vec::new();
    let mut patterns: Vec<TriplePattern> = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("select ").or_else(|| line.strip_prefix("SELECT ")) {
            if !select.is_empty() {
                return Err(QueryError::Malformed(format!(
                    "line {}: duplicate select clause",
                    line_no + 1
                )));
            }
            for token in rest.split_whitespace() {
                let name = token.strip_prefix('?').ok_or_else(|| {
                    QueryError::Malformed(format!(
                        "line {}: select expects ?variables, got `{token}`",
                        line_no + 1
                    ))
                })?;
                select.push(name.to_string());
            }
            continue;
        }

        let (rest, (s, p, o)) = pattern_line(line).map_err(|e| {
            QueryError::Malformed(format!("line {}: {e}", line_no + 1))
        })?;
        if !rest.trim().is_empty() {
            return Err(QueryError::Malformed(format!(
                "line {}: trailing input `{rest}`",
                line_no + 1
            )));
        }
        patterns.push(TriplePattern::new(
            resolve(s, prefixes)?,
            resolve(p, prefixes)?,
            resolve(o, prefixes)?,
        ));
    }

    if patterns.is_empty() {
        return Err(QueryError::Malformed(
            "query has no triple patterns".to_string(),
        ));
    }
    Ok(PatternQuery::new(select, patterns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("dcat".to_string(), "http://www.w3.org/ns/dcat#".to_string());
        map.insert("dcterms".to_string(), "http://purl.org/dc/terms/".to_string());
        map
    }

    #[test]
    fn parses_select_and_patterns() {
        let query = parse_pattern_query(
            "select ?d ?t\n?c dcat:dataset ?d .\n?d dcterms:title ?t .",
            &prefixes(),
        )
        .expect("parse");
        assert_eq!(query.select, vec!["d".to_string(), "t".to_string()]);
        assert_eq!(query.patterns.len(), 2);
        assert_eq!(
            query.patterns[0].predicate,
            PatternTerm::iri("http://www.w3.org/ns/dcat#dataset")
        );
    }

    #[test]
    fn a_expands_to_rdf_type() {
        let query = parse_pattern_query("?c a dcat:Catalog", &prefixes()).expect("parse");
        assert_eq!(query.patterns[0].predicate, PatternTerm::iri(RDF_TYPE));
        assert_eq!(
            query.patterns[0].object,
            PatternTerm::iri("http://www.w3.org/ns/dcat#Catalog")
        );
    }

    #[test]
    fn quoted_literals_and_full_iris() {
        let query = parse_pattern_query(
            "?d <http://purl.org/dc/terms/title> \"a.dcm\" .",
            &prefixes(),
        )
        .expect("parse");
        assert_eq!(
            query.patterns[0].object,
            PatternTerm::Literal("a.dcm".to_string())
        );
    }

    #[test]
    fn comments_and_blank_lines_are_ignored_but_empty_queries_fail() {
        assert!(matches!(
            parse_pattern_query("# nothing\n\n", &prefixes()),
            Err(QueryError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_prefixes_are_reported_by_name() {
        let err = parse_pattern_query("?c foo:bar ?d", &prefixes()).expect_err("unknown prefix");
        assert!(matches!(err, QueryError::UnknownPrefix(p) if p == "foo"));
    }

    #[test]
    fn garbage_lines_carry_the_line_number() {
        let err = parse_pattern_query("?c dcat:dataset", &prefixes()).expect_err("malformed");
        let QueryError::Malformed(message) = err else {
            panic!("expected malformed");
        };
        assert!(message.starts_with("line 1:"));
    }
}
