pub mod browser;

use reqwest::Client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn basic() -> reqwest::Result<Client> {
    Client::builder().user_agent(USER_AGENT).build()
}
