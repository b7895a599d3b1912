//! 认知层：确定性 Reasoner、过程事件与 Episode 主循环

pub mod events;
pub mod loop_;
pub mod reasoner;

pub use events::EpisodeEvent;
pub use loop_::{run_episode, EpisodeOutcome, EpisodeReport, EpisodeSession};
pub use reasoner::{Action, Reasoner};
