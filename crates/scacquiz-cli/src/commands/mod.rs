pub mod export;
pub mod import;
pub mod init;
pub mod leaderboard;
pub mod play;
pub mod validate;
