mod proxy_fallback;
mod traits;

pub use proxy_fallback::*;
pub use traits::*;
