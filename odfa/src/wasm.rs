//! WebAssembly bindings for JavaScript
//!
//! This module provides WASM bindings using wasm-bindgen so a browser
//! page can build automata and render them. Enable with the "wasm"
//! feature flag. Structured outputs are handed over as JSON strings.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::automaton::{Automaton, AutomatonKind};

#[cfg(feature = "wasm")]
fn to_js_error(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// JavaScript-facing automaton wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct JsAutomaton {
    automaton: Automaton,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl JsAutomaton {
    /// Build an automaton of kind "nfa", "dfa" or "odfa"
    ///
    /// Returns an error string if the kind or the pattern is invalid
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, pattern: &str) -> Result<JsAutomaton, JsValue> {
        let kind: AutomatonKind = kind.parse().map_err(to_js_error)?;
        let automaton = Automaton::new(kind, pattern).map_err(to_js_error)?;
        Ok(JsAutomaton { automaton })
    }

    /// The alphabet as an array of one-character strings
    #[wasm_bindgen(getter)]
    pub fn symbols(&self) -> js_sys::Array {
        let array = js_sys::Array::new();
        for c in &self.automaton.symbols {
            array.push(&JsValue::from_str(&c.to_string()));
        }
        array
    }

    /// The transition table as JSON
    #[wasm_bindgen(getter)]
    pub fn transitions(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.automaton.transitions).map_err(to_js_error)
    }

    /// The DFA states as JSON, or `null` for an NFA
    #[wasm_bindgen(getter)]
    pub fn states(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.automaton.states).map_err(to_js_error)
    }

    /// The merged groups as JSON, or `null` unless this is an ODFA
    #[wasm_bindgen(getter)]
    pub fn equals(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.automaton.equals).map_err(to_js_error)
    }

    /// Node/edge graph as JSON
    #[wasm_bindgen(getter)]
    pub fn graph(&self) -> Result<String, JsValue> {
        self.automaton.graph().to_json().map_err(to_js_error)
    }

    /// Recognize an input string; returns `{recognized, route}` as JSON
    #[wasm_bindgen(js_name = recognize)]
    pub fn recognize(&self, input: &str) -> Result<String, JsValue> {
        let result = self.automaton.recognize(input).map_err(to_js_error)?;
        serde_json::to_string(&result).map_err(to_js_error)
    }
}

/// Initialize panic hook for better error messages in WASM
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
