//! Token-based cost estimation for metered providers.
//!
//! Rates are in USD per million tokens and mirror published provider price
//! sheets. Estimation is pure arithmetic over reported token counts; it
//! never consults the network and an unknown model gets a conservative
//! default rate rather than a zero.

/// USD per million tokens for one model.
#[derive(Debug, Clone, Copy)]
struct ModelRate {
    model: &'static str,
    input_per_mtok: f64,
    output_per_mtok: f64,
}

const RATES: &[ModelRate] = &[
    ModelRate {
        model: "gpt-4o",
        input_per_mtok: 2.50,
        output_per_mtok: 10.00,
    },
    ModelRate {
        model: "gpt-4o-mini",
        input_per_mtok: 0.15,
        output_per_mtok: 0.60,
    },
    ModelRate {
        model: "gpt-4.1",
        input_per_mtok: 2.00,
        output_per_mtok: 8.00,
    },
    ModelRate {
        model: "gpt-4.1-mini",
        input_per_mtok: 0.40,
        output_per_mtok: 1.60,
    },
    ModelRate {
        model: "o4-mini",
        input_per_mtok: 1.10,
        output_per_mtok: 4.40,
    },
    ModelRate {
        model: "claude-opus-4-20250514",
        input_per_mtok: 15.00,
        output_per_mtok: 75.00,
    },
    ModelRate {
        model: "claude-sonnet-4-20250514",
        input_per_mtok: 3.00,
        output_per_mtok: 15.00,
    },
    ModelRate {
        model: "claude-3-5-haiku-20241022",
        input_per_mtok: 0.80,
        output_per_mtok: 4.00,
    },
    ModelRate {
        model: "gemini-2.5-pro",
        input_per_mtok: 1.25,
        output_per_mtok: 10.00,
    },
    ModelRate {
        model: "gemini-2.5-flash",
        input_per_mtok: 0.30,
        output_per_mtok: 2.50,
    },
    ModelRate {
        model: "gemini-2.0-flash",
        input_per_mtok: 0.10,
        output_per_mtok: 0.40,
    },
];

/// Rate applied when a metered model is not in the table. Deliberately on
/// the expensive side so estimates err high, never low.
const FALLBACK_RATE: ModelRate = ModelRate {
    model: "",
    input_per_mtok: 5.00,
    output_per_mtok: 15.00,
};

/// Estimates the USD cost of one invocation of `model`.
///
/// Callers skip this entirely for free-tier and local providers; see
/// [`crate::kind::ProviderKind::is_metered`].
#[must_use]
pub fn estimate(model: &str, input_tokens: u32, output_tokens: u32) -> f64 {
    let rate = RATES
        .iter()
        .find(|r| r.model == model)
        .unwrap_or(&FALLBACK_RATE);
    f64::from(input_tokens) / 1_000_000.0 * rate.input_per_mtok
        + f64::from(output_tokens) / 1_000_000.0 * rate.output_per_mtok
}
