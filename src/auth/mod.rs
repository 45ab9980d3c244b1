pub mod grant;
pub mod handle;
pub mod token;

pub use grant::Grant;
pub use handle::SessionHandle;
pub use token::fingerprint;
