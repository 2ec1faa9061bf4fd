//! AI agent executor.
//!
//! Provider and model mismatches degrade rather than fail: an unknown
//! provider or a failed invocation passes the prior carried value through
//! with a log line, and an unknown model falls back to the provider
//! default. The only way this executor changes the carried value is a
//! successful provider reply.

use super::StepOutcome;
use crate::node::AiAgentConfig;
use skein_providers::{ChatClient, ProviderKind, ProviderRequest};
use tracing::warn;

/// Placeholder in prompt templates replaced with the carried value.
const CONTENT_PLACEHOLDER: &str = "{{content}}";

pub(super) async fn run(
    config: &AiAgentConfig,
    carried: &str,
    chat: &dyn ChatClient,
) -> StepOutcome {
    let kind: ProviderKind = match config.provider.parse() {
        Ok(kind) => kind,
        Err(_) => {
            warn!(provider = %config.provider, "unknown provider on ai node");
            return StepOutcome::passthrough(
                carried,
                format!(
                    "ai_agent: unknown provider '{}'; passing value through",
                    config.provider
                ),
            );
        }
    };

    let mut lines = Vec::new();
    let choice = kind.resolve_model(config.model.as_deref());
    if choice.fell_back {
        lines.push(format!(
            "ai_agent: model '{}' is not known to {kind}; using {}",
            config.model.as_deref().unwrap_or_default(),
            choice.model
        ));
    }

    let prompt = build_prompt(config.prompt.as_deref(), carried);
    if prompt.trim().is_empty() {
        lines.push("ai_agent: empty prompt; skipping model call".to_string());
        return StepOutcome {
            value: carried.to_string(),
            lines,
        };
    }

    let mut request = ProviderRequest::new(kind, choice.model.clone(), prompt);
    if let Some(system) = &config.system_prompt {
        request = request.with_system(system.clone());
    }
    if let Some(temperature) = config.temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(max_tokens) = config.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }

    match chat.invoke(request).await {
        Ok(reply) => {
            lines.push(format!(
                "ai_agent: {kind} {} replied ({} tokens in, {} out, est. ${:.4})",
                reply.model, reply.usage.input_tokens, reply.usage.output_tokens,
                reply.estimated_cost
            ));
            StepOutcome {
                value: reply.text,
                lines,
            }
        }
        Err(error) => {
            warn!(provider = %kind, %error, "provider invocation failed");
            lines.push(format!(
                "ai_agent: provider call failed: {error}; passing value through"
            ));
            StepOutcome {
                value: carried.to_string(),
                lines,
            }
        }
    }
}

/// Builds the prompt from the configured template and the carried value.
///
/// A `{{content}}` placeholder is substituted; a template without one gets
/// the carried value appended as trailing context; no template at all means
/// the carried value itself is the prompt.
fn build_prompt(template: Option<&str>, carried: &str) -> String {
    match template {
        Some(template) if template.contains(CONTENT_PLACEHOLDER) => {
            template.replace(CONTENT_PLACEHOLDER, carried)
        }
        Some(template) if !template.trim().is_empty() => {
            if carried.is_empty() {
                template.to_string()
            } else {
                format!("{template}\n\n{carried}")
            }
        }
        _ => carried.to_string(),
    }
}
