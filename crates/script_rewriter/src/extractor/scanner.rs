use crate::extractor::{FunctionExtractor, FunctionOccurrence};

const NAME_OPEN: &str = "name:\"";
const SOURCE_OPEN: &str = "\",source:\"";

/// Hand-written scanner for the `name:"X",source:"Y"` grammar.
///
/// Produces the same occurrences as [`crate::RegexFunctionExtractor`]
/// without a regex engine.
pub struct ScanningFunctionExtractor;

/// Returns the index of the quote that closes a string body starting at
/// `start`, skipping backslash escapes.
fn closing_quote(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn match_at(script: &str, start: usize) -> Option<FunctionOccurrence> {
    let bytes = script.as_bytes();
    let name_start = start + NAME_OPEN.len();
    let name_end = closing_quote(bytes, name_start)?;
    if !script[name_end..].starts_with(SOURCE_OPEN) {
        return None;
    }
    let source_start = name_end + SOURCE_OPEN.len();
    let source_end = closing_quote(bytes, source_start)?;
    Some(FunctionOccurrence {
        span: start..source_end + 1,
        name: script[name_start..name_end].to_string(),
        source: script[source_start..source_end].to_string(),
    })
}

impl FunctionExtractor for ScanningFunctionExtractor {
    fn find_occurrences(&self, script: &str) -> Vec<FunctionOccurrence> {
        let mut found = Vec::new();
        let mut from = 0;
        while let Some(offset) = script[from..].find(NAME_OPEN) {
            let start = from + offset;
            match match_at(script, start) {
                Some(occurrence) => {
                    from = occurrence.span.end;
                    found.push(occurrence);
                }
                None => from = start + 1,
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_quote_skips_escapes() {
        let body = br#"a\"b\\"rest"#;
        assert_eq!(closing_quote(body, 0), Some(6));
    }

    #[test]
    fn test_unterminated_source_is_ignored() {
        let found = ScanningFunctionExtractor.find_occurrences(r#"name:"f",source:"open\""#);
        assert!(found.is_empty());
    }

    #[test]
    fn test_multibyte_text_around_occurrence() {
        let script = r#"ü{name:"ä",source:"function(){return \"ö\"}"}"#;
        let found = ScanningFunctionExtractor.find_occurrences(script);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "ä");
        assert_eq!(found[0].source, r#"function(){return \"ö\"}"#);
    }
}
