// crates/runtime_helper/src/lib.rs

//! The JavaScript glue injected in front of every generated script.
//!
//! The helper registers a `HypeDocumentLoad` listener that only reacts to the
//! document it was exported with, and adds the four Power Pack actions to that
//! document's API. Expressions are evaluated through `new Function(...)` with
//! the document's `customData` passed in as named parameters. Value-producing
//! actions accept a trailing semicolon and several statements, yielding the
//! value of the last one.

/// Global object holding extracted functions, keyed by document identifier.
pub const FUNCTION_TABLE: &str = "HYPE_PowerPackFunctions";

const HYPE_ID_PLACEHOLDER: &str = "__HYPE_ID__";
const FUNCTION_TABLE_PLACEHOLDER: &str = "__FUNCTION_TABLE__";

const JAVASCRIPT_FOR_ACTIONS: &str = r#"
(function () {
	/* @const */
	const _standalone = false;
	const _hypeId = __HYPE_ID__;
	const _identifier = /^[A-Za-z_$][A-Za-z0-9_$]*$/;

	window.__FUNCTION_TABLE__ = window.__FUNCTION_TABLE__ || {};
	window.__FUNCTION_TABLE__[_hypeId] = window.__FUNCTION_TABLE__[_hypeId] || {};

	function _compile(params, source) {
		return Function.apply(null, params.concat([source]));
	}

	/* Value of `expression`, or of its last statement when it holds several. */
	function _valueOf(params, expression) {
		var source = String(expression).replace(/[\s;]+$/, '');
		try {
			return _compile(params, 'return (' + source + ');');
		} catch (e) {
			var split = source.lastIndexOf(';');
			if (!(e instanceof SyntaxError) || split < 0) throw e;
			return _compile(params, source.slice(0, split + 1) + '\nreturn (' + source.slice(split + 1) + ');');
		}
	}

	function _evaluate(hypeDocument, expression, wantsValue) {
		var names = [], values = [];
		for (var key in hypeDocument.customData) {
			if (!_identifier.test(key) || key === 'hypeDocument') continue;
			names.push(key);
			values.push(hypeDocument.customData[key]);
		}
		var params = names.concat(['hypeDocument']);
		var fnc = wantsValue ? _valueOf(params, expression) : _compile(params, expression);
		return fnc.apply(window, values.concat([hypeDocument]));
	}

	if ("HYPE_eventListeners" in window === false) window.HYPE_eventListeners = Array();
	window.HYPE_eventListeners.push({"type":"HypeDocumentLoad", "callback":function (hypeDocument, element, event) {

		if (!_standalone) if (hypeDocument.documentName() !== _hypeId) return;

		hypeDocument.Conditional_Behavior = function (expression, isTrueBehavior, isFalseBehavior) {
			var result;
			try {
				result = _evaluate(hypeDocument, expression, true);
			} catch (e) {
				alert("Condition Error: " + e);
				return;
			}
			if (result && isTrueBehavior) {
				hypeDocument.triggerCustomBehaviorNamed(isTrueBehavior);
			} else if (!result && isFalseBehavior) {
				hypeDocument.triggerCustomBehaviorNamed(isFalseBehavior);
			}
		}

		hypeDocument.Set_Variable = function (name, expression) {
			if (!_identifier.test(name)) {
				alert("Variable Error: invalid variable name " + name);
				return;
			}
			if (!hypeDocument.customData[name]) hypeDocument.customData[name] = null;
			try {
				hypeDocument.customData[name] = _evaluate(hypeDocument, expression, true);
			} catch (e) {
				alert("Variable Error: " + e);
			}
		}

		hypeDocument.Run_Function_by_Selector = function (fnc, selector) {
			if (!hypeDocument.functions()[fnc]) return;
			if (!selector) return;
			try {
				var sceneElm = document.getElementById(hypeDocument.currentSceneId());
				var elms = sceneElm.querySelectorAll(selector);
				elms.forEach(function (elm) {
					hypeDocument.functions()[fnc].call(window, hypeDocument, elm, {type: 'HypeQuery'});
				});
			} catch (e) {
				alert("Run Query Error: " + e);
			}
		}

		hypeDocument.Run_JavaScript_Expression = function (expression) {
			try {
				_evaluate(hypeDocument, expression, false);
			} catch (e) {
				alert("Expression Error: " + e);
			}
		}

		if (hypeDocument.functions()['HypeDocumentLoad']) {
			hypeDocument.functions()['HypeDocumentLoad'](hypeDocument, element, event);
		}

		if (_standalone) window.HypePowerPack = Object.values(HYPE.documents)[0];

		return true;
	}
	});

})();
"#;

/// Quotes `hype_id` as a JavaScript string literal.
///
/// JSON string syntax is a subset of JavaScript's, so any identifier,
/// including non-ASCII ones, is spliced in safely.
pub fn js_string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Returns the helper script bound to the document named `hype_id`.
pub fn javascript_for_actions(hype_id: &str) -> String {
    JAVASCRIPT_FOR_ACTIONS
        .replace(FUNCTION_TABLE_PLACEHOLDER, FUNCTION_TABLE)
        .replace(HYPE_ID_PLACEHOLDER, &js_string_literal(hype_id))
}
