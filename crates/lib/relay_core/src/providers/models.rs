//! Static model registry.
//!
//! Each provider has a fixed allow-list. A caller-supplied model must be in
//! it; an omitted model resolves to the provider default. The calling
//! convention is stored per model, so call sites branch on
//! [`ModelSpec::api_style`] rather than on model names.

use super::{ApiStyle, Provider, ProviderError};

/// One callable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub id: &'static str,
    pub api_style: ApiStyle,
}

/// Model allow-list for one provider.
#[derive(Debug)]
pub struct ProviderModelConfig {
    pub provider: Provider,
    pub default_model: &'static str,
    pub models: &'static [ModelSpec],
}

const fn standard(id: &'static str) -> ModelSpec {
    ModelSpec {
        id,
        api_style: ApiStyle::Standard,
    }
}

const fn structured(id: &'static str) -> ModelSpec {
    ModelSpec {
        id,
        api_style: ApiStyle::Structured,
    }
}

static OPENAI: ProviderModelConfig = ProviderModelConfig {
    provider: Provider::OpenAi,
    default_model: "gpt-4o",
    models: &[
        standard("gpt-4o"),
        standard("gpt-4o-mini"),
        standard("o1"),
        standard("o3-mini"),
        structured("o1-pro"),
        structured("gpt-5"),
    ],
};

static GEMINI: ProviderModelConfig = ProviderModelConfig {
    provider: Provider::Gemini,
    default_model: "gemini-2.0-flash",
    models: &[
        standard("gemini-2.0-flash"),
        standard("gemini-1.5-pro"),
        standard("gemini-2.5-pro"),
    ],
};

static VOYAGE: ProviderModelConfig = ProviderModelConfig {
    provider: Provider::Voyage,
    default_model: "voyage-3",
    models: &[
        standard("voyage-3"),
        standard("voyage-3-lite"),
        standard("voyage-code-3"),
    ],
};

impl ProviderModelConfig {
    /// Registry entry for a provider.
    pub fn for_provider(provider: Provider) -> &'static Self {
        match provider {
            Provider::OpenAi => &OPENAI,
            Provider::Gemini => &GEMINI,
            Provider::Voyage => &VOYAGE,
        }
    }

    /// All allowed model ids, in registry order.
    pub fn model_ids(&self) -> Vec<&'static str> {
        self.models.iter().map(|m| m.id).collect()
    }

    /// Resolve a requested model, or the default when none is given.
    pub fn resolve(&self, requested: Option<&str>) -> Result<ModelSpec, ProviderError> {
        let id = requested.unwrap_or(self.default_model);
        self.models
            .iter()
            .find(|m| m.id == id)
            .copied()
            .ok_or_else(|| ProviderError::UnsupportedModel {
                provider: self.provider.display_name(),
                model: id.to_string(),
                available: self.model_ids().join(", "),
            })
    }
}
