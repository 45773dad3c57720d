//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["exception"]["description"]
                .as_str()
                .or_else(|| exception["text"].as_str())
                .unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Evaluate and deserialize the result.
    pub async fn evaluate_as<T: serde::de::DeserializeOwned>(
        &self,
        expression: &str,
    ) -> Result<T, CdpError> {
        let value = self.evaluate(expression).await?;
        Ok(serde_json::from_value(value)?)
    }
}
