mod fetcher;
mod resolver;
mod response;
mod state;

pub use fetcher::{ConfigFetcher, HttpFetcher};
pub use resolver::{
    fallback, FallbackStrategy, RemoteConfigResolver, Resolution, ResolutionSource,
    ResolverOutcome, ResolverSettings, FALLBACK_CHAIN,
};
pub use response::{validate_destination, RemoteConfigResponse};
pub use state::ConfigFetchState;
