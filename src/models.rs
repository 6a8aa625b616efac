use serde::{Deserialize, Serialize};

// Body of POST /api/plan
#[derive(Deserialize, Serialize, Clone, Default, Debug)]
pub struct PlanRequest {
    #[serde(default)]
    pub goals: Option<String>,
}

// Successful reply, both halves are always present
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PlanResponse {
    pub quote: String,
    pub plan: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

// OpenAI-compatible chat completion request
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ChatMessage {
    pub role: String,
    // providers send null content for some refusals
    #[serde(default)]
    pub content: Option<String>,
}

// Only the fields we read back
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ChatChoice {
    pub message: ChatMessage,
}
