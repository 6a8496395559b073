//! Turning a JSON-LD document into [expanded form](https://www.w3.org/TR/json-ld11/#expanded-document-form).
use serde_json::Value;
use tessera_api::warning::WarningSink;

use crate::error::JsonLdError;

/// Produces the expanded form of a JSON-LD document.
///
/// The result must be an array of node objects (or free-floating values, which are ignored),
/// where every property and every `@type` is an IRI or a blank node identifier.
pub trait Expander {
    fn expand<W: WarningSink + ?Sized>(
        &self,
        document: Value,
        warnings: &mut W,
    ) -> Result<Value, JsonLdError>;
}

/// An [`Expander`] accepting documents which are already expanded.
///
/// A document containing a top-level `@context` is most probably *not* in expanded form.
/// It is still processed (after dropping the context), with a warning:
/// terms that the context would have turned into IRIs are then skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlreadyExpanded;

impl Expander for AlreadyExpanded {
    fn expand<W: WarningSink + ?Sized>(
        &self,
        document: Value,
        warnings: &mut W,
    ) -> Result<Value, JsonLdError> {
        let mut items = match document {
            Value::Array(items) => items,
            Value::Object(_) => vec![document],
            other => {
                return Err(JsonLdError::NotExpanded(format!(
                    "top-level value must be an object or an array, found {other}"
                )))
            }
        };
        let mut contexts = 0;
        for item in items.iter_mut() {
            if let Value::Object(obj) = item {
                if obj.remove("@context").is_some() {
                    contexts += 1;
                }
            }
        }
        if contexts > 0 {
            warnings.warn("Document has an @context and may not be in expanded form; the context is ignored");
        }
        // a lone object with only @graph is the wrapper of the default graph
        if let [Value::Object(obj)] = items.as_mut_slice() {
            if obj.len() == 1 {
                if let Some(graph) = obj.remove("@graph") {
                    return Ok(match graph {
                        Value::Array(_) => graph,
                        other => Value::Array(vec![other]),
                    });
                }
            }
        }
        Ok(Value::Array(items))
    }
}
