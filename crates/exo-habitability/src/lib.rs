//! Clients for the remote habitability scorer and the planet assistant,
//! plus the debounce and request-versioning plumbing around them.
//!
//! Network calls never run on the render thread. Every failure is turned
//! into a safe value at the call site: zero scores, or the apology text.

pub mod assistant;
pub mod client;
pub mod debounce;
pub mod request;
pub mod worker;

pub use assistant::{APOLOGY, AssistantClient, AssistantError, GenerativeAssistant, build_prompt};
pub use client::{HabitabilityError, HabitabilityService, HttpHabitabilityClient, score_or_zero};
pub use debounce::Debouncer;
pub use request::{HabitabilityRequest, HabitabilityResult};
pub use worker::{HabitabilityWorker, RequestVersion, ScoredResponse, VersionTracker};
