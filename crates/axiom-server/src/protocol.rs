//! MCP JSON-RPC dispatch
//!
//! Maps the protocol's three request families onto the loader: resources
//! serve skills (URI scheme `skill://`), prompts serve commands, tools serve
//! agents. This layer is a pure adapter — it performs lookups and reshapes
//! records, nothing else.

use axiom_content::{CollectionKind, ContentError, ContentSource, Document};
use rmcp::model::{CallToolResult, Content};
use serde_json::{json, Value};
use tracing::error;

/// MCP protocol revision this server speaks
const PROTOCOL_VERSION: &str = "2024-11-05";
/// URI scheme under which skills are published as resources
const SKILL_SCHEME: &str = "skill://";

const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const INTERNAL_ERROR: i64 = -32603;
/// MCP-defined code for a resource URI that does not resolve
const RESOURCE_NOT_FOUND: i64 = -32002;

/// A request that could not be served, in JSON-RPC error terms.
struct RequestError {
    code: i64,
    message: String,
}

impl RequestError {
    fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("method not found: {method}"),
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
        }
    }

    fn resource_not_found(uri: &str) -> Self {
        Self {
            code: RESOURCE_NOT_FOUND,
            message: format!("resource not found: {uri}"),
        }
    }
}

impl From<ContentError> for RequestError {
    fn from(err: ContentError) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: err.to_string(),
        }
    }
}

/// Handle one JSON-RPC request against the loader.
///
/// Returns `None` for notifications (no `id` member), which get no response.
/// Loader failures surface as JSON-RPC internal errors; the server process
/// keeps running.
pub fn handle_request(source: &dyn ContentSource, request: &Value) -> Option<Value> {
    let id = request.get("id")?.clone();
    let method = request["method"].as_str().unwrap_or("");
    let params = &request["params"];

    let result = match method {
        "initialize" => Ok(initialize()),
        "ping" => Ok(json!({})),
        "resources/list" => list_resources(source),
        "resources/read" => read_resource(source, params),
        "prompts/list" => list_prompts(source),
        "prompts/get" => get_prompt(source, params),
        "tools/list" => list_tools(source),
        "tools/call" => call_tool(source, params),
        _ => Err(RequestError::method_not_found(method)),
    };

    Some(match result {
        Ok(result) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result
        }),
        Err(e) => {
            error!("request '{}' failed: {}", method, e.message);
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {
                    "code": e.code,
                    "message": e.message
                }
            })
        }
    })
}

fn initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "resources": {},
            "prompts": {},
            "tools": {}
        },
        "serverInfo": {
            "name": "axiom-server",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Collection entries sorted by name, so listings are stable across runs.
fn sorted_docs(
    source: &dyn ContentSource,
    kind: CollectionKind,
) -> Result<Vec<Document>, RequestError> {
    let map = source.collection(kind)?;
    let mut docs: Vec<Document> = map.values().cloned().collect();
    docs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(docs)
}

fn list_resources(source: &dyn ContentSource) -> Result<Value, RequestError> {
    let resources: Vec<Value> = sorted_docs(source, CollectionKind::Skills)?
        .iter()
        .map(|doc| {
            json!({
                "uri": format!("{SKILL_SCHEME}{}", doc.name),
                "name": doc.name,
                "description": doc.description,
                "mimeType": "text/markdown"
            })
        })
        .collect();

    Ok(json!({ "resources": resources }))
}

fn read_resource(source: &dyn ContentSource, params: &Value) -> Result<Value, RequestError> {
    let uri = params["uri"]
        .as_str()
        .ok_or_else(|| RequestError::invalid_params("missing 'uri' parameter"))?;
    let name = uri
        .strip_prefix(SKILL_SCHEME)
        .ok_or_else(|| RequestError::invalid_params(format!("unsupported URI scheme: {uri}")))?;

    let doc = source
        .get_skill(name)?
        .ok_or_else(|| RequestError::resource_not_found(uri))?;

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": "text/markdown",
            "text": doc.body
        }]
    }))
}

fn list_prompts(source: &dyn ContentSource) -> Result<Value, RequestError> {
    let prompts: Vec<Value> = sorted_docs(source, CollectionKind::Commands)?
        .iter()
        .map(|doc| {
            json!({
                "name": doc.name,
                "description": doc.description
            })
        })
        .collect();

    Ok(json!({ "prompts": prompts }))
}

fn get_prompt(source: &dyn ContentSource, params: &Value) -> Result<Value, RequestError> {
    let name = params["name"]
        .as_str()
        .ok_or_else(|| RequestError::invalid_params("missing 'name' parameter"))?;

    let doc = source
        .get_command(name)?
        .ok_or_else(|| RequestError::invalid_params(format!("unknown prompt: {name}")))?;

    Ok(json!({
        "description": doc.description,
        "messages": [{
            "role": "user",
            "content": {
                "type": "text",
                "text": doc.body
            }
        }]
    }))
}

fn list_tools(source: &dyn ContentSource) -> Result<Value, RequestError> {
    let tools: Vec<Value> = sorted_docs(source, CollectionKind::Agents)?
        .iter()
        .map(|doc| {
            json!({
                "name": doc.name,
                "description": doc.description,
                // Agents take no arguments; calling one returns its body.
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            })
        })
        .collect();

    Ok(json!({ "tools": tools }))
}

fn call_tool(source: &dyn ContentSource, params: &Value) -> Result<Value, RequestError> {
    let name = params["name"]
        .as_str()
        .ok_or_else(|| RequestError::invalid_params("missing 'name' parameter"))?;

    let doc = source
        .get_agent(name)?
        .ok_or_else(|| RequestError::invalid_params(format!("unknown tool: {name}")))?;

    let result = CallToolResult {
        content: vec![Content::text(doc.body)],
        is_error: None,
        meta: None,
        structured_content: None,
    };
    Ok(serde_json::to_value(&result)?)
}
