//! In-memory doubles for exercising services without Postgres.

mod clock;
mod mailer;
mod memory;

pub use clock::ManualClock;
pub use mailer::CapturingMailer;
pub use memory::MemoryStore;
