//! scacquiz-core: the SCAC trivia engine.
//!
//! Pure, synchronous quiz logic: question generation, layered answer
//! evaluation, time-decay scoring, and the round state machine. The engine
//! takes entities, elapsed time, and randomness from its caller and owns
//! nothing else; storage and presentation live behind the seams in
//! [`traits`].

pub mod error;
pub mod evaluator;
pub mod generator;
pub mod model;
pub mod scoring;
pub mod session;
pub mod similarity;
pub mod traits;
