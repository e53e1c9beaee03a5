
/// Entity CRUD against an in-memory SQLite store
pub mod crud_tests;
