use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractor::{FunctionExtractor, FunctionOccurrence};

// A string body is any run of non-quote, non-backslash characters or
// backslash escapes, so an escaped quote never ends the match.
static FUNCTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)name:"((?:[^"\\]|\\.)*)",source:"((?:[^"\\]|\\.)*)""#)
        .expect("function pattern is valid")
});

/// Default extractor backed by a single regular expression.
pub struct RegexFunctionExtractor;

impl FunctionExtractor for RegexFunctionExtractor {
    fn find_occurrences(&self, script: &str) -> Vec<FunctionOccurrence> {
        FUNCTION_PATTERN
            .captures_iter(script)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(FunctionOccurrence {
                    span: whole.range(),
                    name: caps.get(1)?.as_str().to_string(),
                    source: caps.get(2)?.as_str().to_string(),
                })
            })
            .collect()
    }
}
