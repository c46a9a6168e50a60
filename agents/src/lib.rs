pub mod agent;
pub mod random;
pub mod prompt;

pub use agent::Seat;
pub use random::RandomSeat;
pub use prompt::PromptSeat;
