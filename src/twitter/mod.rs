// Twitter API client: OAuth signing, authentication, post and message fetching.
//
// Each submodule handles one area of the API surface. The rest of the crate
// only sees the SocialClient trait.

pub mod client;
pub mod messages;
pub mod oauth;
pub mod posts;
pub mod traits;
