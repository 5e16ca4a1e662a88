use crate::error::EngineError;
use crate::index::IndexSnapshot;
use crate::tokenizer::LexicalFilter;
use std::collections::HashSet;

/// Boolean operators the evaluator recognizes, in match priority order:
/// `AND NOT` is checked before plain `AND`, which is checked before `OR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    AndNot,
    And,
    Or,
}

/// Evaluate a single-operator boolean query against the current snapshot.
///
/// The grammar is intentionally minimal: at most one operator keyword, its
/// operands being exactly the token before and the token after it in the
/// whitespace-split query. A query with no operator is looked up as a single
/// bare term. Results are unordered; presentation imposes display order.
pub fn evaluate(
    raw: &str,
    snapshot: &IndexSnapshot,
    filter: &LexicalFilter,
) -> Result<HashSet<String>, EngineError> {
    let words: Vec<&str> = raw.split_whitespace().collect();

    let Some((pos, width, op)) = find_operator(&words) else {
        let term = operand_term(raw, filter)?;
        return Ok(snapshot.postings_for(&term));
    };

    if pos == 0 || pos + width >= words.len() {
        return Err(EngineError::QuerySyntax(format!(
            "operator in '{}' is missing an operand",
            raw.trim()
        )));
    }

    let left = operand_term(words[pos - 1], filter)?;
    let right = operand_term(words[pos + width], filter)?;

    let left_docs = snapshot.postings_for(&left);
    let right_docs = snapshot.postings_for(&right);

    let result = match op {
        BooleanOp::And => left_docs.intersection(&right_docs).cloned().collect(),
        BooleanOp::Or => left_docs.union(&right_docs).cloned().collect(),
        BooleanOp::AndNot => left_docs.difference(&right_docs).cloned().collect(),
    };

    Ok(result)
}

/// Locate the operator keyword, returning its position, width in tokens and
/// kind. Only the highest-priority operator present is recognized.
fn find_operator(words: &[&str]) -> Option<(usize, usize, BooleanOp)> {
    for i in 0..words.len().saturating_sub(1) {
        if words[i].eq_ignore_ascii_case("and") && words[i + 1].eq_ignore_ascii_case("not") {
            return Some((i, 2, BooleanOp::AndNot));
        }
    }
    for (i, word) in words.iter().enumerate() {
        if word.eq_ignore_ascii_case("and") {
            return Some((i, 1, BooleanOp::And));
        }
    }
    for (i, word) in words.iter().enumerate() {
        if word.eq_ignore_ascii_case("or") {
            return Some((i, 1, BooleanOp::Or));
        }
    }
    None
}

/// Run an operand through the lexical filter so its stem is comparable to
/// indexed stems. An operand that normalizes to nothing (punctuation only,
/// or a stopword) is a syntax error, not a fatal one.
fn operand_term(operand: &str, filter: &LexicalFilter) -> Result<String, EngineError> {
    filter
        .analyze(operand)
        .into_iter()
        .next()
        .ok_or_else(|| {
            EngineError::QuerySyntax(format!("operand '{}' normalizes to nothing", operand.trim()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::collections::HashMap;

    fn snapshot() -> IndexSnapshot {
        let filter = LexicalFilter::passthrough();
        let mut docs = HashMap::new();
        for (id, content) in [("doc1", "sol lua sol"), ("doc2", "lua estrela")] {
            let mut doc = Document::new(id.to_string(), content.to_string());
            doc.tokens = filter.analyze(content);
            docs.insert(id.to_string(), doc);
        }
        IndexSnapshot::rebuild(&docs)
    }

    fn ids(result: &HashSet<String>) -> Vec<&str> {
        let mut ids: Vec<&str> = result.iter().map(String::as_str).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_and_intersects() {
        let filter = LexicalFilter::passthrough();
        let result = evaluate("sol AND lua", &snapshot(), &filter).unwrap();
        assert_eq!(ids(&result), vec!["doc1"]);
    }

    #[test]
    fn test_or_unions() {
        let filter = LexicalFilter::passthrough();
        let result = evaluate("sol OR estrela", &snapshot(), &filter).unwrap();
        assert_eq!(ids(&result), vec!["doc1", "doc2"]);
    }

    #[test]
    fn test_and_not_differences() {
        let filter = LexicalFilter::passthrough();
        let result = evaluate("lua AND NOT sol", &snapshot(), &filter).unwrap();
        assert_eq!(ids(&result), vec!["doc2"]);
    }

    #[test]
    fn test_operator_recognition_is_case_insensitive() {
        let filter = LexicalFilter::passthrough();
        let result = evaluate("sol and lua", &snapshot(), &filter).unwrap();
        assert_eq!(ids(&result), vec!["doc1"]);

        let result = evaluate("lua and not sol", &snapshot(), &filter).unwrap();
        assert_eq!(ids(&result), vec!["doc2"]);
    }

    #[test]
    fn test_and_not_wins_over_and() {
        // "AND NOT" must not be parsed as AND with right operand "NOT".
        let filter = LexicalFilter::passthrough();
        let result = evaluate("sol AND NOT lua", &snapshot(), &filter).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_bare_term_lookup() {
        let filter = LexicalFilter::passthrough();
        let result = evaluate("lua", &snapshot(), &filter).unwrap();
        assert_eq!(ids(&result), vec!["doc1", "doc2"]);

        // Unknown term: empty set, not an error.
        let result = evaluate("cometa", &snapshot(), &filter).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_operator_at_edge_is_syntax_error() {
        let filter = LexicalFilter::passthrough();

        let err = evaluate("AND termo", &snapshot(), &filter).unwrap_err();
        assert!(matches!(err, EngineError::QuerySyntax(_)));

        let err = evaluate("termo AND", &snapshot(), &filter).unwrap_err();
        assert!(matches!(err, EngineError::QuerySyntax(_)));

        let err = evaluate("termo AND NOT", &snapshot(), &filter).unwrap_err();
        assert!(matches!(err, EngineError::QuerySyntax(_)));
    }

    #[test]
    fn test_operand_normalizing_to_nothing_is_syntax_error() {
        let filter = LexicalFilter::passthrough();

        let err = evaluate("sol AND !!!", &snapshot(), &filter).unwrap_err();
        assert!(matches!(err, EngineError::QuerySyntax(_)));

        let err = evaluate("...", &snapshot(), &filter).unwrap_err();
        assert!(matches!(err, EngineError::QuerySyntax(_)));
    }

    #[test]
    fn test_boolean_algebra_laws() {
        let filter = LexicalFilter::passthrough();
        let snap = snapshot();

        let sol = snap.postings_for("sol");
        let lua = snap.postings_for("lua");

        let and = evaluate("sol AND lua", &snap, &filter).unwrap();
        assert!(and.is_subset(&sol) && and.is_subset(&lua));

        let or = evaluate("sol OR lua", &snap, &filter).unwrap();
        assert!(or.is_superset(&sol) && or.is_superset(&lua));

        let not = evaluate("lua AND NOT sol", &snap, &filter).unwrap();
        let expected: HashSet<String> = lua.difference(&sol).cloned().collect();
        assert_eq!(not, expected);
    }
}
