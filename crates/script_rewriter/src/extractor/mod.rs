pub mod pattern;
pub mod scanner;

use std::ops::Range;

pub use self::pattern::RegexFunctionExtractor;
pub use self::scanner::ScanningFunctionExtractor;

/// One serialized function found in a generated script.
///
/// `name` and `source` are the raw bodies of the two string literals, still
/// escaped exactly as they appear in the script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionOccurrence {
    /// Byte range of the whole `name:"…",source:"…"` text.
    pub span: Range<usize>,
    pub name: String,
    pub source: String,
}

/// Strategy for locating `name:"X",source:"Y"` pairs.
///
/// Occurrences are returned in script order and never overlap.
pub trait FunctionExtractor {
    fn find_occurrences(&self, script: &str) -> Vec<FunctionOccurrence>;
}

/// Selects an extractor by strategy name (`regex` or `scanner`).
pub fn extractor_for_strategy(name: &str) -> Option<Box<dyn FunctionExtractor>> {
    match name.to_lowercase().as_str() {
        "regex" => Some(Box::new(RegexFunctionExtractor)),
        "scanner" => Some(Box::new(ScanningFunctionExtractor)),
        _ => None,
    }
}
