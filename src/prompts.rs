//! Prompt templates sent to the completion provider.
//!
//! The text of these prompts is the whole contract with the model. Nothing
//! downstream checks that a reply actually follows the requested shape, so
//! any change to the wording bumps [`PROMPT_VERSION`].
//!
//! Expected reply shapes:
//!
//! ```text
//! QUOTE: "<short original quote>"
//! AUTHOR: "Chidinma Helps You Focus"
//! ```
//!
//! ```text
//! PLAN:
//! 1. ...
//! 2. ...
//! 3. ...
//! 4. ...
//! ```
//! (optionally up to `6.`, with no second header section)

pub const PROMPT_VERSION: u32 = 1;

pub const PERSONA: &str = "Chidinma Helps You Focus";

pub const QUOTE_MAX_TOKENS: u32 = 200;
pub const PLAN_MAX_TOKENS: u32 = 600;
pub const TEMPERATURE: f32 = 0.7;

/// Generation settings for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

pub fn quote_prompt(goals: &str) -> PromptSpec {
    let prompt = format!(
        r#"You are a focused, gentle planning companion named CHYF ({PERSONA}).
Given the user's goals for today:
"{goals}"

Produce ONLY:
QUOTE: "a short, original, motivating quote tailored to these goals"
AUTHOR: "{PERSONA}""#
    );

    PromptSpec {
        prompt,
        max_tokens: QUOTE_MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

pub fn plan_prompt(goals: &str) -> PromptSpec {
    let prompt = format!(
        r#"You are CHYF ({PERSONA}), a calm but practical planning companion.

User's message:
"{goals}"

Your job is to quietly understand what they want and then give them a clear, simple, ordered plan. Do NOT explain what you are doing. Do NOT talk about what is or is not "needed". Do NOT add extra commentary. Just give the plan as a list.

First, silently decide which ONE of these this looks most like:
- TYPE A: mainly a full or partial day/evening plan (tasks, work, life, maybe including a focused session like gym or cooking)
- TYPE B: mainly a single focused session request (e.g., "I'm going to the gym, help me out", "Help me cook X", "Help me write Y")

If TYPE B (single focused session):
- Do NOT invent a full-day schedule.
- Create ONLY a clear, doable plan for that session.
- Organize it into a few ordered steps or phases (for example: prepare / main work / finish, or warm-up / main sets / cool-down).
- If it's a workout, you may label the whole list "GYM PLAN:" on the first line.
- If it's something else (cooking, writing, etc.), you may label the whole list appropriately on the first line (e.g., "COOKING PLAN:", "WRITING PLAN:").
- Do NOT create any extra named plan sections beyond that one.

If TYPE A (day/evening/tasks plan):
- Give a realistic day or evening with 3–6 ordered steps.
- Respect time clues:
  - If they say "tonight", focus on evening.
  - If they say "after work" or mention work hours, start after that.
  - If they do not mention work at all, do NOT invent a detailed work block.
- Group similar tasks together when it helps focus.
- Include short breaks and transitions only when useful.
- If there is a specific focused session inside the day (like gym or cooking), you may include that within one of the steps, but do NOT create a separate named "PLAN" section for it.

In ALL cases, respond in EXACTLY this structure (no extra lines before or after, no duplicated sections):

PLAN:
1. ...
2. ...
3. ...
4. ...
(You may add 5. and 6. if genuinely helpful, but no more.)

Never output headers like "GYM PLAN:" as a second section. If you need a label like that, fold it into the text of one of the numbered steps (for example: "3. GYM PLAN: ...")."#
    );

    PromptSpec {
        prompt,
        max_tokens: PLAN_MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}
