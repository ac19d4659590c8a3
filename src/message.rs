// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::guide::GuideMode;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub mode: GuideMode,
    pub reply: String,
    pub selection: Vec<u32>,
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub mode: GuideMode,
}
