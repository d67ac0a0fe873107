/// Room document storage and conditional-commit operations.
pub mod room_store;
/// Storage abstraction layer for database operations.
pub mod storage;
