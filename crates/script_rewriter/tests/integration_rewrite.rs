// crates/script_rewriter/tests/integration_rewrite.rs

use script_rewriter::{
    rewrite_generated_script, FunctionExtractor, RegexFunctionExtractor,
    ScanningFunctionExtractor,
};

/// Trimmed-down shape of what the host writes into `*_hype_generated_script.js`.
const GENERATED: &str = concat!(
    r#"(function(){(function m(){function k(a,b,c,d,e){var f=!1;"#,
    r#"var h={"A":{p:1,n:"Set_Variable",a:[{o:"HypePowerPack.Set_Variable",p:["score","score+1"]}]}};"#,
    r#"var functions=[{name:"untitledFunction",source:"function(hypeDocument, element, event) {\n\twindow.HypePowerPack.Run_JavaScript_Expression(\"alert(\\\"hi\\\")\");\n}",identifier:"36"},"#,
    r#"{name:"HypeDocumentLoad",source:"function(hypeDocument, element, event) {\n\thypeDocument.customData.score = 0;\n}",identifier:"37"}];"#,
    r#"})();})();"#
);

mod integration_rewrite {
    use super::*;

    fn rewrite_with(extractor: &dyn FunctionExtractor) -> script_rewriter::RewrittenScript {
        rewrite_generated_script(GENERATED, "my_document", extractor)
    }

    #[test]
    fn test_action_references_are_document_scoped() {
        let rewritten = rewrite_with(&RegexFunctionExtractor);
        assert!(rewritten
            .body
            .contains(r#"o:"HYPE.documents[\"my_document\"].Set_Variable""#));
        assert!(!rewritten.body.contains("HypePowerPack"));
    }

    #[test]
    fn test_functions_are_extracted_in_order() {
        let rewritten = rewrite_with(&RegexFunctionExtractor);
        let names: Vec<&str> = rewritten.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["untitledFunction", "HypeDocumentLoad"]);

        // The self reference inside the function body was stripped, scoped and
        // decoded into plain code.
        assert_eq!(
            rewritten.functions[0].source,
            "function(hypeDocument, element, event) {\n\tHYPE.documents[\"my_document\"].Run_JavaScript_Expression(\"alert(\\\"hi\\\")\");\n}"
        );
    }

    #[test]
    fn test_inline_sources_become_table_references() {
        let rewritten = rewrite_with(&RegexFunctionExtractor);
        assert!(rewritten.body.contains(
            r#"{name:"untitledFunction",source:"HYPE_PowerPackFunctions[\"my_document\"][\"untitledFunction\"]",identifier:"36"}"#
        ));
        assert!(rewritten.body.contains(
            r#"{name:"HypeDocumentLoad",source:"HYPE_PowerPackFunctions[\"my_document\"][\"HypeDocumentLoad\"]",identifier:"37"}"#
        ));
        assert!(!rewritten.body.contains("customData.score = 0"));
    }

    #[test]
    fn test_declarations_reference_the_identifier_verbatim() {
        let rewritten = rewrite_with(&RegexFunctionExtractor);
        let declarations = rewritten.function_declarations();
        assert_eq!(declarations.lines().count(), 2);
        for line in declarations.lines() {
            assert!(line.starts_with(r#"HYPE_PowerPackFunctions["my_document"]["#));
        }
    }

    #[test]
    fn test_scanner_matches_regex_end_to_end() {
        assert_eq!(
            rewrite_with(&RegexFunctionExtractor),
            rewrite_with(&ScanningFunctionExtractor)
        );
    }
}
