// Tweetcloud: word clouds from a user's Twitter posts and sent messages.
//
// This is the library root. Data flows twitter -> source -> text -> render;
// cloud ties them together for one authenticated user.

pub mod cloud;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod source;
pub mod text;
pub mod twitter;
