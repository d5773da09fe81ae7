//! Tool catalog helpers.
//!
//! Input schemas are generated from the request types with schemars, so the
//! advertised shape and the dispatcher's parser cannot drift apart. Model
//! arguments advertise the provider's allow-list as a JSON Schema `enum`.

use std::sync::Arc;

use relay_core::providers::Provider;
use relay_core::providers::models::ProviderModelConfig;
use rmcp::model::{JsonObject, Tool};
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde_json::{Value, json};

/// Build a tool descriptor whose input schema is derived from `T`.
pub fn descriptor<T: JsonSchema>(name: &'static str, description: &'static str) -> Tool {
    Tool::new(name, description, Arc::new(input_schema::<T>()))
}

/// JSON Schema object for `T`, without the meta keys MCP clients ignore.
pub fn input_schema<T: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(T);
    let mut object = schema.as_object().cloned().unwrap_or_default();
    object.remove("$schema");
    object.remove("title");
    object
        .entry("type")
        .or_insert_with(|| Value::String("object".into()));
    object
}

fn model_schema(provider: Provider) -> Schema {
    let config = ProviderModelConfig::for_provider(provider);
    let mut object = JsonObject::new();
    object.insert("type".into(), json!("string"));
    object.insert("enum".into(), json!(config.model_ids()));
    object.insert("default".into(), json!(config.default_model));
    object.insert(
        "description".into(),
        json!(format!(
            "{} model to use. Defaults to {}.",
            provider.display_name(),
            config.default_model
        )),
    );
    Schema::from(object)
}

// Schema-only defaults. A `schema_with` field is optional only when it has a
// default, and that default is what the catalog advertises.
pub(crate) fn default_openai_model() -> Option<String> {
    default_model(Provider::OpenAi)
}

pub(crate) fn default_gemini_model() -> Option<String> {
    default_model(Provider::Gemini)
}

pub(crate) fn default_voyage_model() -> Option<String> {
    default_model(Provider::Voyage)
}

fn default_model(provider: Provider) -> Option<String> {
    Some(ProviderModelConfig::for_provider(provider).default_model.to_string())
}

pub(crate) fn openai_model_schema(_: &mut SchemaGenerator) -> Schema {
    model_schema(Provider::OpenAi)
}

pub(crate) fn gemini_model_schema(_: &mut SchemaGenerator) -> Schema {
    model_schema(Provider::Gemini)
}

pub(crate) fn voyage_model_schema(_: &mut SchemaGenerator) -> Schema {
    model_schema(Provider::Voyage)
}
