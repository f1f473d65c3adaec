// Shared prompt fragments.
// Each pipeline that calls the LLM defines its own prompts.rs alongside it;
// only instructions used by more than one prompt live here.

/// Fragment that pins the reply to a bare JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Character budget the roast prompts ask for. Advisory: replies are not cut to fit.
pub const ROAST_CHAR_BUDGET: usize = 280;
