//! Lesson videos, whiteboards and code snippets.

use serde::{Deserialize, Serialize};

/// A whiteboard attached to a lesson video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhiteboardData {
    pub id: String,
    pub preview_url: String,
    pub file_url: String,
}

/// A lesson video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub youtube_id: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whiteboard: Option<WhiteboardData>,
}

impl VideoData {
    /// Watch URL on YouTube.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.youtube_id)
    }
}

/// A code demo for a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSnippetData {
    pub id: String,
    pub title: String,
    pub language: String,
    pub github_url: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn video_without_whiteboard() {
        let video: VideoData = serde_json::from_value(json!({
            "id": "v1",
            "title": "Perceptron",
            "description": "Intro",
            "youtube_id": "abc123",
            "duration_minutes": 12
        }))
        .unwrap();

        assert!(video.whiteboard.is_none());
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=abc123");
    }
}
