// crates/script_rewriter/src/lib.rs

//! Text rewrites applied to a host-generated script.
//!
//! The rewrite is purely textual; no JavaScript is parsed. Callers go through
//! [`rewrite_generated_script`] and pick a [`FunctionExtractor`] for the one
//! step that has to understand the host's function serialization.
//!
//! Rewriting is not idempotent: the marker strip and the prefix substitution
//! are applied unconditionally, so feeding already rewritten output back in
//! rewrites the helper's own references a second time.

pub mod escape;
pub mod extractor;

use runtime_helper::{js_string_literal, FUNCTION_TABLE};
use tracing::debug;

pub use escape::{decode_js_string, escape_for_js_string};
pub use extractor::{
    extractor_for_strategy, FunctionExtractor, FunctionOccurrence, RegexFunctionExtractor,
    ScanningFunctionExtractor,
};

/// Global name the action descriptors use as their function prefix.
pub const GLOBAL_PREFIX: &str = "HypePowerPack";

/// Qualified form of [`GLOBAL_PREFIX`] whose `window.` part gets stripped.
pub const SELF_REFERENCE_MARKER: &str = "window.HypePowerPack";

/// A function lifted out of the generated script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedFunction {
    /// Decoded function name.
    pub name: String,
    /// Decoded JavaScript source, ready to be emitted as code.
    pub source: String,
}

/// Result of rewriting one generated script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewrittenScript {
    pub hype_id: String,
    pub body: String,
    pub functions: Vec<ExtractedFunction>,
}

impl RewrittenScript {
    /// JavaScript statements assigning every extracted function into the
    /// document's slot of the function table, one per line.
    pub fn function_declarations(&self) -> String {
        self.functions
            .iter()
            .map(|f| {
                format!(
                    "{} = {};\n",
                    function_table_entry(&self.hype_id, &f.name),
                    f.source
                )
            })
            .collect()
    }
}

/// Expression naming the document's entry in the host's document registry.
pub fn document_lookup(hype_id: &str) -> String {
    format!("HYPE.documents[{}]", js_string_literal(hype_id))
}

/// Expression naming one extracted function in the function table.
pub fn function_table_entry(hype_id: &str, name: &str) -> String {
    format!(
        "{}[{}][{}]",
        FUNCTION_TABLE,
        js_string_literal(hype_id),
        js_string_literal(name)
    )
}

/// Removes the `window.` qualifier from self references.
pub fn strip_self_reference(script: &str) -> String {
    script.replace(SELF_REFERENCE_MARKER, GLOBAL_PREFIX)
}

/// Rewrites the global prefix into a lookup of this document. The lookup is
/// escaped for use inside a string literal, where the host writes action
/// references.
pub fn scope_global_calls(script: &str, hype_id: &str) -> String {
    script.replace(GLOBAL_PREFIX, &escape_for_js_string(&document_lookup(hype_id)))
}

/// Moves every serialized function into the function table and leaves a
/// reference to its table entry in place of the inline source.
pub fn extract_functions(
    script: &str,
    hype_id: &str,
    extractor: &dyn FunctionExtractor,
) -> (String, Vec<ExtractedFunction>) {
    let occurrences = extractor.find_occurrences(script);
    let mut body = String::with_capacity(script.len());
    let mut functions = Vec::with_capacity(occurrences.len());
    let mut last = 0;

    for occurrence in occurrences {
        let name = decode_js_string(&occurrence.name);
        let reference = escape_for_js_string(&function_table_entry(hype_id, &name));
        body.push_str(&script[last..occurrence.span.start]);
        body.push_str(&format!(
            "name:\"{}\",source:\"{}\"",
            occurrence.name, reference
        ));
        last = occurrence.span.end;
        functions.push(ExtractedFunction {
            name,
            source: decode_js_string(&occurrence.source),
        });
    }
    body.push_str(&script[last..]);
    (body, functions)
}

/// Applies the marker strip, the prefix substitution and the function
/// extraction, in that order.
pub fn rewrite_generated_script(
    script: &str,
    hype_id: &str,
    extractor: &dyn FunctionExtractor,
) -> RewrittenScript {
    let script = strip_self_reference(script);
    let script = scope_global_calls(&script, hype_id);
    let (body, functions) = extract_functions(&script, hype_id, extractor);
    debug!(hype_id, extracted = functions.len(), "rewrote generated script");
    RewrittenScript {
        hype_id: hype_id.to_string(),
        body,
        functions,
    }
}
