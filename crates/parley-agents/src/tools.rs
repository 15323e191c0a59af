//! Tool descriptors exposed to agents.
//!
//! Only the contract of each tool lives here: name, description and input
//! schema. Execution (and the mock data behind the demo tools) belongs to
//! the external agent runtime.

use serde::Serialize;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// The contract of one tool an agent may invoke.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Tool identifier, e.g. "get-weather".
    pub name: &'static str,
    /// Human-readable description shown to the model.
    pub description: &'static str,
    /// JSON schema of the tool's input object.
    pub input_schema: Value,
}

static TOOLS: OnceLock<Vec<ToolDescriptor>> = OnceLock::new();

/// Returns all tool descriptors known to the system.
pub fn tool_descriptors() -> &'static [ToolDescriptor] {
    TOOLS.get_or_init(|| {
        vec![
            ToolDescriptor {
                name: "get-weather",
                description: "Get current weather conditions for a location",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "location": {
                            "type": "string",
                            "description": "City name, e.g. \"Tokyo\""
                        }
                    },
                    "required": ["location"]
                }),
            },
            ToolDescriptor {
                name: "get-travel-info",
                description: "Get travel recommendations and information for a destination",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "destination": {
                            "type": "string",
                            "description": "Destination city or country"
                        },
                        "interests": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Travel interests (e.g. culture, food, nature, adventure)"
                        }
                    },
                    "required": ["destination"]
                }),
            },
            ToolDescriptor {
                name: "get-timezone",
                description: "Get current time for a city",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "City name (e.g. \"Tokyo\", \"New York\", \"London\")"
                        }
                    },
                    "required": ["city"]
                }),
            },
        ]
    })
}

/// Finds a tool descriptor by name.
pub fn find_tool(name: &str) -> Option<&'static ToolDescriptor> {
    tool_descriptors().iter().find(|tool| tool.name == name)
}
