/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Solo practice question lookups.
pub mod question_service;
/// Room lifecycle and gameplay operations.
pub mod room_service;
/// Storage reconnection supervisor.
pub mod storage_supervisor;
/// Optimistic read/apply/commit cycle for room mutations.
pub mod transaction;
