//! Postgres-backed test infrastructure.


pub(crate) use db::TestDb;
