//! Request and Response models for the verification API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreateCacheRequest, QuestionRequest, RegisterRequest, SubmitAnswerRequest};
pub use responses::{
    AccumulatorResponse, AuditResponse, CacheDetailResponse, CacheSummary, CreateCacheResponse,
    HealthResponse, QuizOptions, QuizResponse, StatsResponse, UserResponse, VerificationResponse,
};
