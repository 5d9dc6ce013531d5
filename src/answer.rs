use std::sync::LazyLock;

use regex::Regex;

use crate::models::AnswerRecord;

pub const FALLBACK_CHAPTER: &str = "सामान्य सामग्री";
pub const FALLBACK_PAGE: &str = "पूरी किताब";
pub const FALLBACK_ANSWER: &str = "जवाब नहीं मिल सका";

// Greedy on purpose: first `{` through the last `}`.
static JSON_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{.*\}").unwrap_or_else(|_| Regex::new("^$").unwrap())
});

/// Extracts an [`AnswerRecord`] from a free-form model reply. Never fails: a
/// reply without a parseable JSON object degrades to [`fallback_record`].
pub fn parse_answer_record(reply: &str) -> AnswerRecord {
    let Some(span) = extract_json_span(reply) else {
        return fallback_record(reply);
    };

    // Going through `Value` first lets a repeated key keep its last value.
    let parsed = serde_json::from_str::<serde_json::Value>(span)
        .and_then(serde_json::from_value::<AnswerRecord>);
    match parsed {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!("model reply contained unparseable JSON, using fallback: {err}");
            fallback_record(reply)
        }
    }
}

pub fn fallback_record(reply: &str) -> AnswerRecord {
    let answer = if reply.trim().is_empty() {
        FALLBACK_ANSWER
    } else {
        reply
    };
    AnswerRecord::new(FALLBACK_CHAPTER, FALLBACK_PAGE, answer)
}

fn extract_json_span(reply: &str) -> Option<&str> {
    JSON_SPAN.find(reply).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_json_is_extracted() {
        let reply =
            r#"blah blah {"chapter":"2","pageNumber":"14","answer":"x"} trailing"#;
        assert_eq!(parse_answer_record(reply), AnswerRecord::new("2", "14", "x"));
    }

    #[test]
    fn fenced_multiline_json_is_extracted() {
        let reply = "```json\n{\n  \"chapter\": \"अध्याय 3\",\n  \"pageNumber\": \"42\",\n  \"answer\": \"प्रकाश संश्लेषण\"\n}\n```";
        let record = parse_answer_record(reply);
        assert_eq!(record.chapter.as_deref(), Some("अध्याय 3"));
        assert_eq!(record.page_number.as_deref(), Some("42"));
        assert_eq!(record.answer.as_deref(), Some("प्रकाश संश्लेषण"));
    }

    #[test]
    fn reply_without_braces_falls_back_verbatim() {
        let reply = "  The book does not say.\n";
        let record = parse_answer_record(reply);
        assert_eq!(record.chapter.as_deref(), Some(FALLBACK_CHAPTER));
        assert_eq!(record.page_number.as_deref(), Some(FALLBACK_PAGE));
        assert_eq!(record.answer.as_deref(), Some(reply));
    }

    #[test]
    fn empty_reply_gets_sentinel_answer() {
        let record = parse_answer_record("");
        assert_eq!(record.answer.as_deref(), Some(FALLBACK_ANSWER));
        assert!(!FALLBACK_ANSWER.is_empty());
    }

    #[test]
    fn missing_fields_pass_through_as_absent() {
        let record = parse_answer_record(r#"{"answer":"only this"}"#);
        assert_eq!(record.chapter, None);
        assert_eq!(record.page_number, None);
        assert_eq!(record.answer.as_deref(), Some("only this"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "answer": "only this" }));
    }

    #[test]
    fn numeric_page_is_kept_as_text() {
        let record = parse_answer_record(r#"{"chapter":"1","pageNumber":14,"answer":"y"}"#);
        assert_eq!(record.page_number.as_deref(), Some("14"));
    }

    #[test]
    fn two_fragments_break_greedy_match_and_fall_back() {
        let reply = r#"{"chapter":"1"} and also {"answer":"2"}"#;
        let record = parse_answer_record(reply);
        assert_eq!(record.chapter.as_deref(), Some(FALLBACK_CHAPTER));
        assert_eq!(record.answer.as_deref(), Some(reply));
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let record =
            parse_answer_record(r#"{"chapter":"1","chapter":"2","pageNumber":"5","answer":"z"}"#);
        assert_eq!(record, AnswerRecord::new("2", "5", "z"));
    }

    #[test]
    fn closing_brace_before_opening_is_not_a_span() {
        let reply = "} nothing here {";
        let record = parse_answer_record(reply);
        assert_eq!(record.answer.as_deref(), Some(reply));
    }

    #[test]
    fn serialized_record_uses_page_number_key() {
        let json = serde_json::to_value(AnswerRecord::new("a", "b", "c")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "chapter": "a", "pageNumber": "b", "answer": "c" })
        );
    }
}
