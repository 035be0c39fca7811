//! Request DTOs for the verification API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::error::Result;
use crate::store::{NewCache, NewQuizTest};

/// Request body for user registration (POST /users)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

/// One quiz question inside a [`CreateCacheRequest`]
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    /// One of "a", "b", "c"
    pub answer: String,
}

/// Request body for cache creation (POST /caches)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCacheRequest {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub questions: Vec<QuestionRequest>,
}

impl CreateCacheRequest {
    /// Splits the request into store drafts, parsing each answer letter.
    pub fn into_drafts(self) -> Result<(NewCache, Vec<NewQuizTest>)> {
        let questions = self
            .questions
            .into_iter()
            .map(|q| -> Result<NewQuizTest> {
                Ok(NewQuizTest {
                    answer: q.answer.parse()?,
                    question: q.question,
                    option_a: q.option_a,
                    option_b: q.option_b,
                    option_c: q.option_c,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let cache = NewCache {
            name: self.name,
            description: self.description,
            latitude: self.latitude,
            longitude: self.longitude,
        };

        Ok((cache, questions))
    }
}

/// Request body for answering a quiz (POST /caches/:id/answers)
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub test_id: u64,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AnswerOption;

    const CREATE_JSON: &str = r#"{
        "name": "Clock tower",
        "description": "Look up",
        "latitude": 46.5,
        "longitude": 6.6,
        "questions": [
            {"question": "Q1", "option_a": "x", "option_b": "y", "option_c": "z", "answer": "a"},
            {"question": "Q2", "option_a": "x", "option_b": "y", "option_c": "z", "answer": "c"}
        ]
    }"#;

    #[test]
    fn test_create_cache_request_into_drafts() {
        let req: CreateCacheRequest = serde_json::from_str(CREATE_JSON).unwrap();
        let (cache, questions) = req.into_drafts().unwrap();

        assert_eq!(cache.name, "Clock tower");
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].answer, AnswerOption::C);
        assert_eq!(questions[0].question, "Q1");
    }

    #[test]
    fn test_create_cache_request_bad_answer_letter() {
        let json = CREATE_JSON.replace(r#""answer": "c""#, r#""answer": "d""#);
        let req: CreateCacheRequest = serde_json::from_str(&json).unwrap();
        assert!(req.into_drafts().is_err());
    }

    #[test]
    fn test_create_cache_request_questions_default() {
        let json = r#"{"name": "n", "description": "d", "latitude": 0.0, "longitude": 0.0}"#;
        let req: CreateCacheRequest = serde_json::from_str(json).unwrap();
        assert!(req.questions.is_empty());
    }

    #[test]
    fn test_submit_answer_request_deserialize() {
        let json = r#"{"test_id": 4, "answer": "b"}"#;
        let req: SubmitAnswerRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.test_id, 4);
        assert_eq!(req.answer, "b");
    }
}
