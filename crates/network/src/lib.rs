// crates/network/src/lib.rs
//! Feed fetching over HTTP

mod client;
mod error;

pub use client::{get_podcast_from_url, Client, ClientConfig};
pub use error::{NetworkError, NetworkResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exports_accessible() {
        let client = Client::new().expect("Failed to create client");
        let _: &ClientConfig = client.config();
        let _: NetworkResult<()> = Ok(());
    }
}
