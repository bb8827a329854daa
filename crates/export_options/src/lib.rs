// crates/export_options/src/lib.rs

use serde::Serialize;

/// Name of the per-document setting that turns on remote minification.
pub const MINIFY_SETTING: &str = "Minify using Closure Compiler";

/// Oldest host build that understands the options document below.
pub const MIN_HOST_BUILD_VERSION: &str = "596";

/// Primitive type of an action argument, serialized by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ArgumentType {
    String,
    Number,
    Boolean,
}

/// One typed argument of an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArgumentDescriptor {
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: ArgumentType,
}

/// A custom action the host's editor offers to end users.
///
/// `function` is the dotted reference the host writes into the generated
/// script; the post-processor later rewrites its `HypePowerPack` prefix into a
/// per-document lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub label: &'static str,
    pub function: &'static str,
    pub arguments: Vec<ArgumentDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SaveOptions {
    pub allows_export: bool,
    pub allows_preview: bool,
}

/// The full document returned for `--get_options`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionsDocument {
    pub extra_actions: Vec<ActionDescriptor>,
    pub document_arguments: Vec<&'static str>,
    pub default_document_arguments: serde_json::Map<String, serde_json::Value>,
    pub save_options: SaveOptions,
    pub min_hype_build_version: &'static str,
}

fn string_arg(label: &'static str) -> ArgumentDescriptor {
    ArgumentDescriptor {
        label,
        kind: ArgumentType::String,
    }
}

/// Returns the actions in the order the host lists them.
pub fn extra_actions() -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor {
            label: "Conditional Behavior",
            function: "HypePowerPack.Conditional_Behavior",
            arguments: vec![
                string_arg("Expression"),
                string_arg("Behavior true"),
                string_arg("Behavior false"),
            ],
        },
        ActionDescriptor {
            label: "Set Variable",
            function: "HypePowerPack.Set_Variable",
            arguments: vec![string_arg("Variable"), string_arg("Expression")],
        },
        ActionDescriptor {
            label: "Run Function by Selector",
            function: "HypePowerPack.Run_Function_by_Selector",
            arguments: vec![string_arg("Function"), string_arg("Query Selector")],
        },
        ActionDescriptor {
            label: "Run JavaScript Expression",
            function: "HypePowerPack.Run_JavaScript_Expression",
            arguments: vec![string_arg("Expression")],
        },
    ]
}

pub fn save_options() -> SaveOptions {
    SaveOptions {
        allows_export: true,
        allows_preview: true,
    }
}

/// Builds the options document advertised to the host.
pub fn options_document() -> OptionsDocument {
    let mut defaults = serde_json::Map::new();
    defaults.insert(
        MINIFY_SETTING.to_string(),
        serde_json::Value::String("false".to_string()),
    );
    OptionsDocument {
        extra_actions: extra_actions(),
        document_arguments: vec![MINIFY_SETTING],
        default_document_arguments: defaults,
        save_options: save_options(),
        min_hype_build_version: MIN_HOST_BUILD_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actions_are_namespaced_under_power_pack() {
        for action in extra_actions() {
            assert!(
                action.function.starts_with("HypePowerPack."),
                "unexpected function reference {}",
                action.function
            );
        }
    }

    #[test]
    fn test_conditional_behavior_serialization() {
        let value = serde_json::to_value(&extra_actions()[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "label": "Conditional Behavior",
                "function": "HypePowerPack.Conditional_Behavior",
                "arguments": [
                    {"label": "Expression", "type": "String"},
                    {"label": "Behavior true", "type": "String"},
                    {"label": "Behavior false", "type": "String"}
                ]
            })
        );
    }

    #[test]
    fn test_options_document_fields() {
        let value = serde_json::to_value(options_document()).unwrap();
        assert_eq!(value["min_hype_build_version"], json!("596"));
        assert_eq!(
            value["save_options"],
            json!({"allows_export": true, "allows_preview": true})
        );
        assert_eq!(value["extra_actions"].as_array().unwrap().len(), 4);
        assert_eq!(value["document_arguments"], json!([MINIFY_SETTING]));
        assert_eq!(value["default_document_arguments"][MINIFY_SETTING], json!("false"));
    }

    #[test]
    fn test_argument_counts() {
        let counts: Vec<usize> = extra_actions().iter().map(|a| a.arguments.len()).collect();
        assert_eq!(counts, vec![3, 2, 2, 1]);
    }
}
