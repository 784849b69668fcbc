mod token;

pub use token::CachedToken;
pub use token::TokenManager;
