//! Interactive chat loop for Parley.
//!
//! Slash commands manage sessions and models; anything else is sent as a
//! message. Replies are printed as they arrive, whichever session they belong
//! to. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
